//! The single-pass scan: classify rows, track the current account block, and
//! accumulate net amounts per (account, month).

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::amounts::normalize_amount;
use crate::cell::{Cell, LedgerRow};
use crate::classify::{RowKind, classify};
use crate::months::{MonthKey, MonthSelection};

/// Composite account identity: code and description from the header row.
/// Two headers with the same pair refer to the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountKey {
    pub code: String,
    pub description: String,
}

/// Accumulated nets for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBucket {
    pub key: AccountKey,
    pub net_by_month: BTreeMap<MonthKey, f64>,
}

/// Accounts in first-encounter order, with an index for re-encounters.
#[derive(Debug, Default)]
pub struct NetLedger {
    accounts: Vec<AccountBucket>,
    index: HashMap<AccountKey, usize>,
}

impl NetLedger {
    /// Create the bucket for `key` if unseen; re-encounters reuse the
    /// existing bucket so accumulation continues rather than resetting.
    fn ensure_bucket(&mut self, key: &AccountKey, seed: &[MonthKey]) {
        if self.index.contains_key(key) {
            return;
        }
        let net_by_month = seed.iter().map(|m| (*m, 0.0)).collect();
        self.index.insert(key.clone(), self.accounts.len());
        self.accounts.push(AccountBucket {
            key: key.clone(),
            net_by_month,
        });
    }

    fn add(&mut self, key: &AccountKey, month: MonthKey, net: f64) {
        if let Some(&i) = self.index.get(key) {
            *self.accounts[i].net_by_month.entry(month).or_insert(0.0) += net;
        }
    }

    pub fn accounts(&self) -> &[AccountBucket] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Recoverable conditions collected during the scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Numeric text in `C` or `D` that no parse survived; contributed 0.0.
    UnparseableAmount {
        row: usize,
        column: char,
        text: String,
    },
    /// Transaction row before any account header; skipped.
    OrphanTransaction { row: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnparseableAmount { row, column, text } => write!(
                f,
                "row {row}, column {column}: unparseable amount '{text}' treated as 0"
            ),
            Warning::OrphanTransaction { row } => {
                write!(f, "row {row}: transaction before any account header; skipped")
            }
        }
    }
}

/// What to do with numeric text that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Zero-fill and record a warning with the row coordinates.
    #[default]
    Lenient,
    /// Abort the run.
    Strict,
}

/// Options for one pivot run.
#[derive(Debug, Clone, Default)]
pub struct PivotOptions {
    pub months: MonthSelection,
    pub policy: ParsePolicy,
}

/// Completed scan: the ledger, the resolved month columns, and the
/// conditions recovered along the way.
#[derive(Debug)]
pub struct ScanOutcome {
    pub ledger: NetLedger,
    pub months: Vec<MonthKey>,
    pub warnings: Vec<Warning>,
}

/// One left-to-right pass over the rows. The fold state is explicit: the
/// current account (None until the first header), the ledger, the observed
/// month set, and the warning list. No lookahead, and no reconciliation of
/// totals rows against the accumulated nets.
pub fn scan(rows: &[LedgerRow], opts: &PivotOptions) -> Result<ScanOutcome> {
    let seed = match opts.months {
        MonthSelection::Inferred => Vec::new(),
        MonthSelection::Fixed { .. } => opts.months.resolve(&BTreeSet::new()),
    };

    let mut current: Option<AccountKey> = None;
    let mut ledger = NetLedger::default();
    let mut observed: BTreeSet<MonthKey> = BTreeSet::new();
    let mut warnings: Vec<Warning> = Vec::new();

    for row in rows {
        match classify(row) {
            RowKind::AccountHeader { code, description } => {
                let key = AccountKey { code, description };
                ledger.ensure_bucket(&key, &seed);
                current = Some(key);
            }
            RowKind::Transaction { date } => {
                let Some(key) = current.as_ref() else {
                    warnings.push(Warning::OrphanTransaction {
                        row: row.source_row,
                    });
                    continue;
                };
                let month = MonthKey::from_date(date);
                if !opts.months.contains(month) {
                    continue;
                }
                let debit = amount_for(row.c(), row.source_row, 'C', opts.policy, &mut warnings)?;
                let credit = amount_for(row.d(), row.source_row, 'D', opts.policy, &mut warnings)?;
                observed.insert(month);
                ledger.add(key, month, debit - credit);
            }
            RowKind::Totals | RowKind::Ignored => {}
        }
    }

    let months = opts.months.resolve(&observed);
    Ok(ScanOutcome {
        ledger,
        months,
        warnings,
    })
}

fn amount_for(
    cell: &Cell,
    row: usize,
    column: char,
    policy: ParsePolicy,
    warnings: &mut Vec<Warning>,
) -> Result<f64> {
    match normalize_amount(cell) {
        Some(v) => Ok(v),
        None => {
            let text = cell.as_text();
            match policy {
                ParsePolicy::Strict => {
                    bail!("row {row}, column {column}: unparseable amount '{text}'")
                }
                ParsePolicy::Lenient => {
                    warnings.push(Warning::UnparseableAmount { row, column, text });
                    Ok(0.0)
                }
            }
        }
    }
}
