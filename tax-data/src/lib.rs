//! Loads the tax rate and bracket tables from key/value CSV files.

pub mod config;
pub mod error;
pub mod loader;

pub use config::TablePaths;
pub use error::{ErrorKind, ParseError, TableLoadError};
pub use loader::{KeyValueRecord, TaxTablesLoader};
