//! Adjusted gross income.

use rust_decimal::Decimal;

use crate::AmountSet;

/// Total income minus the sum of above-the-line deductions.
///
/// Nothing is clamped: deductions larger than income give a negative AGI.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::AmountSet;
/// use tax_core::calculations::adjusted_gross_income;
///
/// let deductions = AmountSet::from_pairs(
///     "above-the-line deductions",
///     [("401(k)".to_string(), dec!(19500)), ("HSA".to_string(), dec!(3500))],
/// )
/// .unwrap();
///
/// assert_eq!(adjusted_gross_income(dec!(100000), &deductions), dec!(77000));
/// ```
pub fn adjusted_gross_income(
    total_income: Decimal,
    above_the_line: &AmountSet,
) -> Decimal {
    total_income - above_the_line.total()
}
