use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use saldo_core::{MonthSelection, ParsePolicy, PivotOptions, RowKind, classify};

mod config;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "saldo", version, about = "Monthly net balances per account from a ledger export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pivot a ledger export into one row per account, one column per month
    Pivot {
        /// Input workbook (.xlsx)
        #[arg(long)]
        input: PathBuf,

        /// Output file (default: saldo_mensual.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// First month column, YYYY-MM (requires --to)
        #[arg(long)]
        from: Option<String>,

        /// Last month column, YYYY-MM (requires --from)
        #[arg(long)]
        to: Option<String>,

        /// Abort on unparseable amounts instead of zero-filling
        #[arg(long)]
        strict: bool,

        /// Rows to skip when the header row cannot be located
        #[arg(long)]
        skip_rows: Option<usize>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Config file (default: ~/.saldo/config.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the located header offset and each row's classification
    Inspect {
        /// Input workbook (.xlsx)
        #[arg(long)]
        input: PathBuf,

        /// Rows to skip when the header row cannot be located
        #[arg(long)]
        skip_rows: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Pivot {
            input,
            output,
            from,
            to,
            strict,
            skip_rows,
            format,
            config,
        } => run_pivot(PivotArgs {
            input,
            output,
            from,
            to,
            strict,
            skip_rows,
            format,
            config,
        }),
        Command::Inspect { input, skip_rows } => run_inspect(&input, skip_rows),
    }
}

struct PivotArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    from: Option<String>,
    to: Option<String>,
    strict: bool,
    skip_rows: Option<usize>,
    format: Option<OutputFormat>,
    config: Option<PathBuf>,
}

fn run_pivot(args: PivotArgs) -> Result<()> {
    let cfg = config::load(args.config.as_deref())?;

    let months = match (&args.from, &args.to) {
        (None, None) => MonthSelection::Inferred,
        (Some(f), Some(t)) => MonthSelection::Fixed {
            start: f.parse().context("--from")?,
            end: t.parse().context("--to")?,
        },
        _ => bail!("--from and --to must be given together"),
    };

    let policy = if args.strict || cfg.strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };
    let skip_rows = args.skip_rows.or(cfg.skip_rows);
    let format = args
        .format
        .or(cfg.format)
        .unwrap_or(OutputFormat::Csv);
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format.default_filename()));

    if !args.input.exists() {
        bail!("input not found: {}", args.input.display());
    }

    let sheet = saldo_ingest::read_first_sheet(&args.input)?;
    let rows = saldo_ingest::data_rows(&sheet, skip_rows)?;

    let opts = PivotOptions { months, policy };
    let out = saldo_core::pivot(rows, &opts)?;

    for w in &out.warnings {
        eprintln!("warning: {w}");
    }

    output::write_matrix(&output, &out.matrix, format)?;

    println!(
        "Wrote {} ({} accounts, {} months, {} warnings)",
        output.display(),
        out.account_count,
        out.months.len(),
        out.warnings.len()
    );
    Ok(())
}

fn run_inspect(input: &Path, skip_rows: Option<usize>) -> Result<()> {
    if !input.exists() {
        bail!("input not found: {}", input.display());
    }

    let sheet = saldo_ingest::read_first_sheet(input)?;
    let rows = saldo_ingest::data_rows(&sheet, skip_rows)?;
    println!("data starts after {} banner row(s)", sheet.len() - rows.len());

    for row in rows {
        println!("row {:>5}: {}", row.source_row, describe(&classify(row)));
    }
    Ok(())
}

fn describe(kind: &RowKind) -> String {
    match kind {
        RowKind::AccountHeader { code, description } => {
            format!("account header {code} ({description})")
        }
        RowKind::Totals => "totals".to_string(),
        RowKind::Transaction { date } => format!("transaction {date}"),
        RowKind::Ignored => "ignored".to_string(),
    }
}
