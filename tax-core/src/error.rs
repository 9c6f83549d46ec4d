//! Error types shared by the tax tables and the calculation pipeline.

use rust_decimal::Decimal;
use thiserror::Error;

/// A required table or key is missing, or a mapping table is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A lookup table does not contain a key the calculation needs.
    #[error("table '{table}' is missing required key '{key}'")]
    MissingKey { table: &'static str, key: String },

    /// A mapping table lists the same key twice.
    #[error("table '{table}' defines key '{key}' more than once")]
    DuplicateKey { table: &'static str, key: String },
}

/// Input or table data is well-formed but violates a tax-domain rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A bracket schedule must contain at least one bracket.
    #[error("tax bracket schedule is empty")]
    EmptySchedule,

    /// Bracket thresholds must be strictly ascending in file order.
    #[error(
        "bracket {index} threshold {threshold} does not exceed the previous threshold {previous}"
    )]
    NonAscendingThreshold {
        index: usize,
        previous: Decimal,
        threshold: Decimal,
    },

    /// A tax rate must be a fraction between 0 and 1.
    #[error("{name} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { name: String, rate: Decimal },

    /// Filing status must be one of the four known ordinals or codes.
    #[error("filing status '{0}' is not one of 1-4 (S, MFJ, MFS, HOH)")]
    InvalidFilingStatus(String),

    /// Total income may not be negative.
    #[error("total income must not be negative, got {0}")]
    NegativeIncome(Decimal),

    /// The standard deduction table needs exactly one row per filing status.
    #[error("standard deduction table must have exactly {expected} entries, found {found}")]
    StandardDeductionCount { expected: usize, found: usize },

    /// The amounts in a deduction or credit table sum past what a decimal can hold.
    #[error("amounts in {table} table overflow when summed")]
    AmountOverflow { table: &'static str },

    /// The Social Security wage base must be positive.
    #[error("social security wage base must be positive, got {0}")]
    InvalidWageBase(Decimal),
}

/// Any failure the calculation pipeline can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
