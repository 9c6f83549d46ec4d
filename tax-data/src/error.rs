use std::path::PathBuf;

use tax_core::{ConfigError, ValidationError};
use thiserror::Error;

/// A field that should hold a decimal amount could not be parsed.
#[derive(Debug, Error)]
#[error("{table} table line {line}: invalid decimal '{value}': {source}")]
pub struct ParseError {
    pub table: &'static str,
    pub line: u64,
    pub value: String,
    #[source]
    pub source: rust_decimal::Error,
}

/// Coarse classification of a load failure, used to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Parse,
}

/// Errors that can occur when loading the tax tables.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("cannot read {table} table at '{}': {source}", .path.display())]
    Io {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{table} table line {line}: {reason}")]
    Malformed {
        table: &'static str,
        line: u64,
        reason: String,
    },

    #[error("cannot read table config '{}': {source}", .path.display())]
    ConfigFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table config '{}': {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid {table} table: {source}")]
    Validation {
        table: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl TableLoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Io { .. }
            | Self::Csv { .. }
            | Self::Malformed { .. }
            | Self::ConfigFileIo { .. }
            | Self::ConfigFile { .. }
            | Self::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn validation(
        table: &'static str,
        source: ValidationError,
    ) -> Self {
        Self::Validation { table, source }
    }
}

