//! Flat-rate state income tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::StateTaxInfo;

/// Result of the state tax step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    /// AGI minus the personal exemption. May be negative.
    pub state_taxable_income: Decimal,
    pub state_tax: Decimal,
}

/// `(agi - personal exemption) * flat rate`, not clamped at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::StateTaxInfo;
/// use tax_core::calculations::state_tax;
///
/// let info = StateTaxInfo {
///     personal_exemption: dec!(10000),
///     flat_rate: dec!(0.05),
/// };
///
/// assert_eq!(state_tax(dec!(50000), &info).state_tax, dec!(2000.00));
/// ```
pub fn state_tax(
    agi: Decimal,
    info: &StateTaxInfo,
) -> StateTaxResult {
    let state_taxable_income = agi - info.personal_exemption;
    StateTaxResult {
        state_taxable_income,
        state_tax: state_taxable_income * info.flat_rate,
    }
}
