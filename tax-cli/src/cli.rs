use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tax_core::{
    SurtaxPolicy,
    calculations::{CalculationPolicy, TopBracketPolicy},
};
use tax_data::TablePaths;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Take-home pay calculator.
///
/// Loads the federal, FICA and state tables, computes the tax owed on a
/// year's income and prints what is left. Missing income or filing status
/// is asked for on stdin.
#[derive(Debug, Parser)]
#[command(name = "take-home", version, about)]
pub struct Cli {
    /// Total income for the year, e.g. `85000` or `85,000.00`.
    #[arg(short, long, allow_hyphen_values = true)]
    pub income: Option<String>,

    /// Filing status: 1-4 or S, MFJ, MFS, HOH.
    #[arg(short, long)]
    pub filing_status: Option<String>,

    /// Directory holding the table files.
    #[arg(short, long, env = "TAKE_HOME_TABLES", default_value = "csv_files")]
    pub tables: PathBuf,

    /// TOML file naming the table directory and per-file overrides.
    /// Takes precedence over `--tables`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Which Medicare surtax threshold keys are accepted.
    #[arg(long, value_enum, default_value_t = SurtaxArg::Strict)]
    pub surtax_policy: SurtaxArg,

    /// How income above the last bracket threshold is taxed.
    #[arg(long, value_enum, default_value_t = TopBracketArg::Unbounded)]
    pub top_bracket: TopBracketArg,

    /// Also print intermediate values and per-bracket slices.
    #[arg(short, long)]
    pub breakdown: bool,

    /// Log at debug level. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    pub verbose: bool,

    /// Append log records to this file as well.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SurtaxArg {
    /// Each filing status uses its own threshold key.
    Strict,
    /// Single uses "Single"; every other status uses "Jointly".
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopBracketArg {
    /// Income above the last threshold is taxed at the top rate.
    Unbounded,
    /// Income above the last threshold is not taxed.
    Capped,
}

impl From<SurtaxArg> for SurtaxPolicy {
    fn from(arg: SurtaxArg) -> Self {
        match arg {
            SurtaxArg::Strict => SurtaxPolicy::Strict,
            SurtaxArg::Legacy => SurtaxPolicy::Legacy,
        }
    }
}

impl From<TopBracketArg> for TopBracketPolicy {
    fn from(arg: TopBracketArg) -> Self {
        match arg {
            TopBracketArg::Unbounded => TopBracketPolicy::Unbounded,
            TopBracketArg::Capped => TopBracketPolicy::Capped,
        }
    }
}

impl Cli {
    pub fn policy(&self) -> CalculationPolicy {
        CalculationPolicy {
            surtax: self.surtax_policy.into(),
            top_bracket: self.top_bracket.into(),
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Resolves table locations: the config file when given, otherwise the
    /// table directory with default file names.
    pub fn table_paths(&self) -> Result<TablePaths> {
        match &self.config {
            Some(path) => TablePaths::from_config_file(path)
                .with_context(|| format!("failed to read table config '{}'", path.display())),
            None => Ok(TablePaths::from_dir(&self.tables)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("take-home").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);

        assert_eq!(cli.income, None);
        assert_eq!(cli.filing_status, None);
        assert_eq!(cli.policy(), CalculationPolicy::default());
        assert!(!cli.breakdown);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_policy_flags() {
        let cli = parse(&["--surtax-policy", "legacy", "--top-bracket", "capped"]);

        assert_eq!(
            cli.policy(),
            CalculationPolicy {
                surtax: SurtaxPolicy::Legacy,
                top_bracket: TopBracketPolicy::Capped,
            }
        );
    }

    #[test]
    fn test_negative_income_is_accepted_as_a_value() {
        let cli = parse(&["--income", "-500", "-f", "MFJ", "-v"]);

        assert_eq!(cli.income.as_deref(), Some("-500"));
        assert_eq!(cli.filing_status.as_deref(), Some("MFJ"));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_unknown_policy_is_usage_error() {
        let err = Cli::try_parse_from(["take-home", "--top-bracket", "sideways"]).unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_table_paths_from_dir() {
        let cli = parse(&["--tables", "/srv/tables"]);

        assert_eq!(
            cli.table_paths().unwrap(),
            TablePaths::from_dir("/srv/tables")
        );
    }
}
