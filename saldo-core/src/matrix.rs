//! Render the accumulated ledger into the output matrix.

use serde::Serialize;

use crate::aggregate::NetLedger;
use crate::months::MonthKey;

pub const CODE_HEADER: &str = "Código";
pub const DESCRIPTION_HEADER: &str = "Descripción";

/// One output cell. The identity columns are text, month cells numeric.
/// Serializes untagged, so the JSON rendering is a plain mixed array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatrixCell {
    Text(String),
    Number(f64),
}

/// Header row plus one row per account, accounts in first-encounter order,
/// month columns ascending. Any (account, month) pair the ledger never
/// touched renders as numeric 0.
pub fn build_matrix(ledger: &NetLedger, months: &[MonthKey]) -> Vec<Vec<MatrixCell>> {
    let mut rows = Vec::with_capacity(ledger.len() + 1);

    let mut head = vec![
        MatrixCell::Text(CODE_HEADER.to_string()),
        MatrixCell::Text(DESCRIPTION_HEADER.to_string()),
    ];
    head.extend(months.iter().map(|m| MatrixCell::Text(m.to_string())));
    rows.push(head);

    for bucket in ledger.accounts() {
        let mut row = vec![
            MatrixCell::Text(bucket.key.code.clone()),
            MatrixCell::Text(bucket.key.description.clone()),
        ];
        row.extend(months.iter().map(|m| {
            MatrixCell::Number(bucket.net_by_month.get(m).copied().unwrap_or(0.0))
        }));
        rows.push(row);
    }

    rows
}
