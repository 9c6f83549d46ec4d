//! Taxable income: AGI less the larger of the standard or itemized deduction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AmountSet;

/// Which deduction the taxpayer ends up taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionKind {
    Standard,
    Itemized,
}

/// Result of the taxable income step, including the losing deduction for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableIncome {
    pub standard_deduction: Decimal,
    pub itemized_total: Decimal,
    pub deduction_kind: DeductionKind,
    pub deduction_used: Decimal,
    /// AGI minus the deduction used. May be negative.
    pub taxable_income: Decimal,
}

/// Subtracts the greater of `standard_deduction` and the itemized total from `agi`.
///
/// A tie goes to the standard deduction. The result is not clamped at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::AmountSet;
/// use tax_core::calculations::{DeductionKind, taxable_income};
///
/// let itemized = AmountSet::from_pairs(
///     "itemized deductions",
///     [("Mortgage Interest".to_string(), dec!(15000))],
/// )
/// .unwrap();
///
/// let result = taxable_income(dec!(80000), dec!(12000), &itemized);
///
/// assert_eq!(result.deduction_used, dec!(15000));
/// assert_eq!(result.deduction_kind, DeductionKind::Itemized);
/// assert_eq!(result.taxable_income, dec!(65000));
/// ```
pub fn taxable_income(
    agi: Decimal,
    standard_deduction: Decimal,
    itemized: &AmountSet,
) -> TaxableIncome {
    let itemized_total = itemized.total();
    let (deduction_kind, deduction_used) = if itemized_total > standard_deduction {
        (DeductionKind::Itemized, itemized_total)
    } else {
        (DeductionKind::Standard, standard_deduction)
    };

    let taxable_income = agi - deduction_used;
    if taxable_income < Decimal::ZERO {
        warn!(
            agi = %agi,
            deduction_used = %deduction_used,
            taxable_income = %taxable_income,
            "Deductions exceed AGI; taxable income is negative"
        );
    }

    TaxableIncome {
        standard_deduction,
        itemized_total,
        deduction_kind,
        deduction_used,
        taxable_income,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn itemized(total: Decimal) -> AmountSet {
        AmountSet::from_pairs("itemized deductions", [("Total".to_string(), total)]).unwrap()
    }

    #[test]
    fn picks_itemized_when_larger() {
        let result = taxable_income(dec!(95000), dec!(12000), &itemized(dec!(15000)));

        assert_eq!(result.deduction_used, dec!(15000));
        assert_eq!(result.deduction_kind, DeductionKind::Itemized);
        assert_eq!(result.taxable_income, dec!(80000));
    }

    #[test]
    fn picks_standard_when_larger() {
        let result = taxable_income(dec!(95000), dec!(12000), &itemized(dec!(9000)));

        assert_eq!(
            result,
            TaxableIncome {
                standard_deduction: dec!(12000),
                itemized_total: dec!(9000),
                deduction_kind: DeductionKind::Standard,
                deduction_used: dec!(12000),
                taxable_income: dec!(83000),
            }
        );
    }

    #[test]
    fn tie_uses_standard_deduction() {
        let result = taxable_income(dec!(50000), dec!(12000), &itemized(dec!(12000)));

        assert_eq!(result.deduction_kind, DeductionKind::Standard);
        assert_eq!(result.deduction_used, dec!(12000));
    }

    #[test]
    fn empty_itemized_set_uses_standard() {
        let result = taxable_income(dec!(50000), dec!(12000), &AmountSet::new());

        assert_eq!(result.itemized_total, Decimal::ZERO);
        assert_eq!(result.taxable_income, dec!(38000));
    }

    #[test]
    fn deduction_larger_than_agi_gives_negative_taxable_income() {
        let result = taxable_income(dec!(8000), dec!(12000), &AmountSet::new());

        assert_eq!(result.taxable_income, dec!(-4000));
    }
}
