use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::{
    ConfigError, FilingStatus, TaxCalculator, TaxError, TaxInput, TaxSummary, ValidationError,
};
use tax_data::{ErrorKind, TableLoadError, TaxTablesLoader};
use tracing::info;

use crate::{
    cli::Cli,
    prompt::Prompter,
    report::TaxReport,
    utils::{InputError, parse_amount},
};

// ─── exit codes ──────────────────────────────────────────────────────────────

pub const EXIT_IO: u8 = 1;
pub const EXIT_PARSE: u8 = 3;
pub const EXIT_VALIDATION: u8 = 4;
pub const EXIT_CONFIG: u8 = 5;

/// Picks the process exit code for a failed run from the first typed error
/// in the chain. Anything unrecognized is treated as an I/O failure.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<TableLoadError>() {
            return match err.kind() {
                ErrorKind::Config => EXIT_CONFIG,
                ErrorKind::Validation => EXIT_VALIDATION,
                ErrorKind::Parse => EXIT_PARSE,
            };
        }
        if let Some(err) = cause.downcast_ref::<TaxError>() {
            return match err {
                TaxError::Config(_) => EXIT_CONFIG,
                TaxError::Validation(_) => EXIT_VALIDATION,
            };
        }
        if cause.is::<InputError>() {
            return EXIT_PARSE;
        }
        if cause.is::<ValidationError>() {
            return EXIT_VALIDATION;
        }
        if cause.is::<ConfigError>() {
            return EXIT_CONFIG;
        }
    }
    EXIT_IO
}

// ─── run ─────────────────────────────────────────────────────────────────────

/// Loads the tables, collects any missing input through `input`/`output`,
/// calculates, and writes the report to `output`.
pub fn run<R: BufRead, W: Write>(
    cli: &Cli,
    input: R,
    mut output: W,
) -> Result<TaxSummary> {
    let paths = cli.table_paths()?;
    let tables = TaxTablesLoader::load(&paths).context("failed to load tax tables")?;

    let tax_input = {
        let mut prompter = Prompter::new(input, &mut output);
        collect_input(cli, &mut prompter)?
    };
    info!(
        total_income = %tax_input.total_income,
        filing_status = %tax_input.filing_status,
        "calculating"
    );

    let summary = TaxCalculator::new(&tables, cli.policy())
        .calculate(&tax_input)
        .context("tax calculation failed")?;

    write!(
        output,
        "{}",
        TaxReport::new(&summary).with_breakdown(cli.breakdown)
    )?;
    output.flush()?;

    Ok(summary)
}

/// Takes income and filing status from the flags, prompting for whichever is missing.
fn collect_input<R: BufRead, W: Write>(
    cli: &Cli,
    prompter: &mut Prompter<R, W>,
) -> Result<TaxInput> {
    let total_income: Decimal = match &cli.income {
        Some(value) => parse_amount("income", value)?,
        None => prompter.income()?,
    };
    let filing_status: FilingStatus = match &cli.filing_status {
        Some(value) => value.parse()?,
        None => prompter.filing_status()?,
    };
    Ok(TaxInput {
        total_income,
        filing_status,
    })
}
