pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::{TaxCalculator, TaxInput, TaxSummary};
pub use error::{ConfigError, TaxError, ValidationError};
pub use models::*;
