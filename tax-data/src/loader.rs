use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use tax_core::{
    AmountSet, BracketSchedule, ConfigError, FicaRates, StandardDeduction,
    StandardDeductionTable, StateTaxInfo, SurtaxThresholds, TaxBracket, TaxError, TaxTables,
    ValidationError,
};
use tracing::{debug, info};

use crate::{ParseError, TableLoadError, TablePaths};

pub const TAX_BRACKETS_TABLE: &str = "federal tax brackets";
pub const ATL_DEDUCTIONS_TABLE: &str = "above-the-line deductions";
pub const ITEMIZED_DEDUCTIONS_TABLE: &str = "itemized deductions";
pub const TAX_CREDITS_TABLE: &str = "tax credits";
pub const STANDARD_DEDUCTIONS_TABLE: &str = "standard deductions";
pub const SS_WAGE_BASE_TABLE: &str = "social security wage base";

/// A single `key,value` line from a table file.
///
/// `line` is the 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueRecord {
    pub line: u64,
    pub key: String,
    pub value: Decimal,
}

/// Loader for the key/value CSV tables.
///
/// Every table file has the same shape: no header row, one `key,value`
/// record per line, whitespace around fields ignored, blank lines skipped.
/// Records are returned in file order, which matters for the bracket
/// schedule and the standard deduction table.
pub struct TaxTablesLoader;

impl TaxTablesLoader {
    /// Parse key/value records from a CSV reader.
    ///
    /// # Errors
    ///
    /// - [`TableLoadError::Malformed`] if a line does not have exactly two fields
    /// - [`TableLoadError::Parse`] if a value is not a decimal
    /// - [`TableLoadError::Csv`] if the CSV itself cannot be read
    pub fn parse<R: Read>(
        table: &'static str,
        reader: R,
    ) -> Result<Vec<KeyValueRecord>, TableLoadError> {
        let mut csv_reader = csv_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let record = result.map_err(|source| TableLoadError::Csv { table, source })?;
            let line = record.position().map_or(0, |p| p.line());

            if record.len() != 2 {
                return Err(TableLoadError::Malformed {
                    table,
                    line,
                    reason: format!("expected 'key,value', found {} field(s)", record.len()),
                });
            }

            records.push(KeyValueRecord {
                line,
                key: record[0].to_string(),
                value: parse_amount(table, line, &record[1])?,
            });
        }

        Ok(records)
    }

    /// Parse a single-value table: the first line holds one decimal.
    ///
    /// Lines after the first are ignored.
    pub fn parse_scalar<R: Read>(
        table: &'static str,
        reader: R,
    ) -> Result<Decimal, TableLoadError> {
        let mut csv_reader = csv_reader(reader);
        let record = csv_reader
            .records()
            .next()
            .ok_or_else(|| TableLoadError::Malformed {
                table,
                line: 1,
                reason: "expected a single value, found an empty file".to_string(),
            })?
            .map_err(|source| TableLoadError::Csv { table, source })?;
        let line = record.position().map_or(1, |p| p.line());

        if record.len() != 1 {
            return Err(TableLoadError::Malformed {
                table,
                line,
                reason: format!("expected a single value, found {} fields", record.len()),
            });
        }

        parse_amount(table, line, &record[0])
    }

    /// Read, parse, and validate every table named by `paths`.
    pub fn load(paths: &TablePaths) -> Result<TaxTables, TableLoadError> {
        let brackets = Self::read(TAX_BRACKETS_TABLE, &paths.tax_brackets)?;
        let atl = Self::read(ATL_DEDUCTIONS_TABLE, &paths.atl_deductions)?;
        let itemized = Self::read(ITEMIZED_DEDUCTIONS_TABLE, &paths.itemized_deductions)?;
        let credits = Self::read(TAX_CREDITS_TABLE, &paths.tax_credits)?;
        let standard = Self::read(STANDARD_DEDUCTIONS_TABLE, &paths.standard_deductions)?;
        let fica = Self::read(FicaRates::TABLE, &paths.fica_taxes)?;
        let surtax = Self::read(SurtaxThresholds::TABLE, &paths.medicare_surtax)?;
        let state = Self::read(StateTaxInfo::TABLE, &paths.state_tax_info)?;
        let ss_wage_base = Self::parse_scalar(
            SS_WAGE_BASE_TABLE,
            open(SS_WAGE_BASE_TABLE, &paths.ss_wage_base)?,
        )?;

        let fica_rates = FicaRates::from_table(&lookup_table(FicaRates::TABLE, fica)?)?;
        fica_rates
            .validate()
            .map_err(|source| TableLoadError::validation(FicaRates::TABLE, source))?;

        let state_tax = StateTaxInfo::from_table(&lookup_table(StateTaxInfo::TABLE, state)?)?;
        state_tax
            .validate()
            .map_err(|source| TableLoadError::validation(StateTaxInfo::TABLE, source))?;

        if ss_wage_base <= Decimal::ZERO {
            return Err(TableLoadError::validation(
                SS_WAGE_BASE_TABLE,
                ValidationError::InvalidWageBase(ss_wage_base),
            ));
        }

        let tables = TaxTables {
            federal_brackets: bracket_schedule(&brackets)?,
            above_the_line_deductions: amount_set(ATL_DEDUCTIONS_TABLE, atl)?,
            itemized_deductions: amount_set(ITEMIZED_DEDUCTIONS_TABLE, itemized)?,
            credits: amount_set(TAX_CREDITS_TABLE, credits)?,
            standard_deductions: standard_deductions(standard)?,
            fica_rates,
            surtax_thresholds: SurtaxThresholds::new(lookup_table(
                SurtaxThresholds::TABLE,
                surtax,
            )?),
            state_tax,
            ss_wage_base,
        };

        info!(
            brackets = tables.federal_brackets.len(),
            top_rate = %tables.federal_brackets.top().rate,
            "tax tables loaded"
        );
        Ok(tables)
    }

    /// Convenience wrapper: resolve the default file names under `dir` and load.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<TaxTables, TableLoadError> {
        Self::load(&TablePaths::from_dir(dir))
    }

    fn read(
        table: &'static str,
        path: &Path,
    ) -> Result<Vec<KeyValueRecord>, TableLoadError> {
        let records = Self::parse(table, open(table, path)?)?;
        debug!(table, path = %path.display(), records = records.len(), "table read");
        Ok(records)
    }
}

/// Builds the federal schedule in file order; keys are the thresholds.
pub fn bracket_schedule(records: &[KeyValueRecord]) -> Result<BracketSchedule, TableLoadError> {
    let brackets = records
        .iter()
        .map(|record| {
            let threshold = parse_amount(TAX_BRACKETS_TABLE, record.line, &record.key)?;
            Ok(TaxBracket::new(threshold, record.value))
        })
        .collect::<Result<Vec<_>, TableLoadError>>()?;

    BracketSchedule::new(brackets)
        .map_err(|source| TableLoadError::validation(TAX_BRACKETS_TABLE, source))
}

/// Builds a summable set; duplicate names and an overflowing sum are rejected.
pub fn amount_set(
    table: &'static str,
    records: Vec<KeyValueRecord>,
) -> Result<AmountSet, TableLoadError> {
    let pairs = records.into_iter().map(|record| (record.key, record.value));
    AmountSet::from_pairs(table, pairs).map_err(|err| match err {
        TaxError::Config(source) => source.into(),
        TaxError::Validation(source) => TableLoadError::validation(table, source),
    })
}

/// Builds a lookup table; duplicate keys are rejected.
pub fn lookup_table(
    table: &'static str,
    records: Vec<KeyValueRecord>,
) -> Result<HashMap<String, Decimal>, TableLoadError> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        if map.contains_key(&record.key) {
            return Err(ConfigError::DuplicateKey {
                table,
                key: record.key,
            }
            .into());
        }
        map.insert(record.key, record.value);
    }
    Ok(map)
}

/// Builds the standard deduction table by row position.
pub fn standard_deductions(
    records: Vec<KeyValueRecord>
) -> Result<StandardDeductionTable, TableLoadError> {
    let rows = records
        .into_iter()
        .map(|record| StandardDeduction {
            label: record.key,
            amount: record.value,
        })
        .collect();

    StandardDeductionTable::from_rows(rows)
        .map_err(|source| TableLoadError::validation(STANDARD_DEDUCTIONS_TABLE, source))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true) // field count is checked per table
        .from_reader(reader)
}

fn open(
    table: &'static str,
    path: &Path,
) -> Result<File, TableLoadError> {
    File::open(path).map_err(|source| TableLoadError::Io {
        table,
        path: path.to_path_buf(),
        source,
    })
}

fn parse_amount(
    table: &'static str,
    line: u64,
    value: &str,
) -> Result<Decimal, TableLoadError> {
    value.trim().parse::<Decimal>().map_err(|source| {
        ParseError {
            table,
            line,
            value: value.to_string(),
            source,
        }
        .into()
    })
}
