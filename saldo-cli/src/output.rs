//! Matrix serialization: CSV (default) and JSON array-of-arrays.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use saldo_core::MatrixCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn default_filename(self) -> &'static str {
        match self {
            OutputFormat::Csv => "saldo_mensual.csv",
            OutputFormat::Json => "saldo_mensual.json",
        }
    }
}

pub fn write_matrix(path: &Path, matrix: &[Vec<MatrixCell>], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(path, matrix),
        OutputFormat::Json => write_json(path, matrix),
    }
}

fn write_csv(path: &Path, matrix: &[Vec<MatrixCell>]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for row in matrix {
        let record: Vec<String> = row.iter().map(cell_text).collect();
        wtr.write_record(&record)?;
    }
    wtr.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn write_json(path: &Path, matrix: &[Vec<MatrixCell>]) -> Result<()> {
    let json = serde_json::to_string_pretty(matrix).context("serialize matrix")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Whole numbers render without a trailing `.0`, matching how a spreadsheet
/// would display them.
fn cell_text(cell: &MatrixCell) -> String {
    match cell {
        MatrixCell::Text(s) => s.clone(),
        MatrixCell::Number(n) => format!("{n}"),
    }
}
