//! Tax calculation components and the pipeline that chains them.
//!
//! Each component is a pure function of its inputs. [`TaxCalculator`] runs
//! them in order against a set of [`crate::TaxTables`].

pub mod agi;
pub mod common;
pub mod federal;
pub mod fica;
pub mod pipeline;
pub mod state;
pub mod taxable_income;

pub use agi::adjusted_gross_income;
pub use federal::{BracketSlice, FederalTaxEngine, FederalTaxResult, TopBracketPolicy};
pub use fica::{FicaEngine, FicaResult};
pub use pipeline::{CalculationPolicy, TaxCalculator, TaxInput, TaxSummary};
pub use state::{StateTaxResult, state_tax};
pub use taxable_income::{DeductionKind, TaxableIncome, taxable_income};
