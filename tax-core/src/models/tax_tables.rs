use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AmountSet, BracketSchedule, FicaRates, StandardDeductionTable, StateTaxInfo,
    SurtaxThresholds,
};

/// Every rate and bracket table one calculation run needs.
///
/// Built once from the data files and never mutated afterwards. Each
/// component validates itself on construction; the loader checks the rates
/// and the wage base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxTables {
    pub federal_brackets: BracketSchedule,
    pub above_the_line_deductions: AmountSet,
    pub itemized_deductions: AmountSet,
    pub credits: AmountSet,
    pub standard_deductions: StandardDeductionTable,
    pub fica_rates: FicaRates,
    pub surtax_thresholds: SurtaxThresholds,
    pub state_tax: StateTaxInfo,
    /// Income cap for the Social Security portion of FICA.
    pub ss_wage_base: Decimal,
}
