//! saldo-core: row classification and per-account monthly net aggregation
//! for semi-structured ledger exports.

pub mod aggregate;
pub mod amounts;
pub mod cell;
pub mod classify;
pub mod dates;
pub mod matrix;
pub mod months;

pub use aggregate::{
    AccountBucket, AccountKey, NetLedger, ParsePolicy, PivotOptions, ScanOutcome, Warning, scan,
};
pub use amounts::normalize_amount;
pub use cell::{Cell, LedgerRow};
pub use classify::{RowKind, classify};
pub use dates::normalize_date;
pub use matrix::{CODE_HEADER, DESCRIPTION_HEADER, MatrixCell, build_matrix};
pub use months::{MonthKey, MonthSelection};

use anyhow::Result;

/// Full pivot output: the rendered matrix plus what the shell reports about
/// the run.
#[derive(Debug)]
pub struct PivotOutput {
    pub matrix: Vec<Vec<MatrixCell>>,
    pub months: Vec<MonthKey>,
    pub account_count: usize,
    pub warnings: Vec<Warning>,
}

/// Full pipeline: scan the rows once and render the output matrix.
/// A pure function of (rows, options); running it twice on the same input
/// produces identical output.
pub fn pivot(rows: &[LedgerRow], opts: &PivotOptions) -> Result<PivotOutput> {
    let outcome = scan(rows, opts)?;
    let matrix = build_matrix(&outcome.ledger, &outcome.months);
    Ok(PivotOutput {
        matrix,
        months: outcome.months,
        account_count: outcome.ledger.len(),
        warnings: outcome.warnings,
    })
}
