mod amount_set;
mod filing_status;
mod rate_tables;
mod standard_deduction;
mod tax_bracket;
mod tax_tables;

pub use amount_set::AmountSet;
pub use filing_status::FilingStatus;
pub use rate_tables::{FicaRates, StateTaxInfo, SurtaxPolicy, SurtaxThresholds};
pub use standard_deduction::{StandardDeduction, StandardDeductionTable};
pub use tax_bracket::{BracketSchedule, TaxBracket};
pub use tax_tables::TaxTables;
