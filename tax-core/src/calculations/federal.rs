//! Federal income tax from a progressive bracket schedule.
//!
//! # Bracket Walk
//!
//! Each bracket is an `(upper threshold, marginal rate)` pair. Walking the
//! schedule in order with a running `previous` threshold starting at zero:
//!
//! | Condition                      | Tax added                            | Next step          |
//! |--------------------------------|--------------------------------------|--------------------|
//! | `income > threshold`           | `(threshold - previous) * rate`      | advance `previous` |
//! | `income <= threshold`          | `(income - previous) * rate`         | stop               |
//!
//! Income exactly equal to a threshold takes the second row, so that
//! bracket is taxed in part and the walk stops.
//!
//! If income exceeds every threshold the walk never stops on its own. What
//! happens to the remainder is governed by [`TopBracketPolicy`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{AmountSet, BracketSchedule, TaxBracket};
//! use tax_core::calculations::{FederalTaxEngine, TopBracketPolicy};
//!
//! let schedule = BracketSchedule::new(vec![
//!     TaxBracket::new(dec!(10000), dec!(0.10)),
//!     TaxBracket::new(dec!(40000), dec!(0.12)),
//!     TaxBracket::new(dec!(90000), dec!(0.22)),
//!     TaxBracket::new(dec!(170000), dec!(0.24)),
//! ])
//! .unwrap();
//!
//! let engine = FederalTaxEngine::new(&schedule, TopBracketPolicy::Unbounded);
//! let result = engine.calculate(dec!(100000), &AmountSet::new());
//!
//! // 10000×0.10 + 30000×0.12 + 50000×0.22 + 10000×0.24
//! assert_eq!(result.tax_before_credits, dec!(18000));
//! assert_eq!(result.slices.len(), 4);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{AmountSet, BracketSchedule};

/// What to do with taxable income above the last bracket's threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopBracketPolicy {
    /// The last bracket's rate applies to all income above its threshold.
    #[default]
    Unbounded,
    /// Income above the last threshold is not taxed.
    Capped,
}

/// The part of taxable income that fell into one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower: Decimal,
    /// `None` for the open-ended span above the last threshold.
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    /// Income taxed in this slice. Negative when taxable income is negative.
    pub taxed_amount: Decimal,
    pub tax: Decimal,
}

/// Result of the federal income tax step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxResult {
    pub taxable_income: Decimal,
    /// Slices in schedule order; only brackets the walk reached appear.
    pub slices: Vec<BracketSlice>,
    pub tax_before_credits: Decimal,
    pub credits: Decimal,
    /// Tax before credits minus credits. May be negative.
    pub federal_income_tax: Decimal,
    /// Income above the last threshold that went untaxed under
    /// [`TopBracketPolicy::Capped`].
    pub untaxed_income: Decimal,
}

/// Applies a validated [`BracketSchedule`] to taxable income.
#[derive(Debug, Clone)]
pub struct FederalTaxEngine<'a> {
    schedule: &'a BracketSchedule,
    policy: TopBracketPolicy,
}

impl<'a> FederalTaxEngine<'a> {
    pub fn new(
        schedule: &'a BracketSchedule,
        policy: TopBracketPolicy,
    ) -> Self {
        Self { schedule, policy }
    }

    /// Runs the bracket walk and subtracts `credits`.
    ///
    /// Neither the bracket tax nor the final amount is clamped at zero.
    pub fn calculate(
        &self,
        taxable_income: Decimal,
        credits: &AmountSet,
    ) -> FederalTaxResult {
        let (slices, untaxed_income) = self.walk_brackets(taxable_income);
        let tax_before_credits = slices.iter().map(|slice| slice.tax).sum::<Decimal>();
        let credits = credits.total();
        let federal_income_tax = tax_before_credits - credits;

        debug!(
            taxable_income = %taxable_income,
            tax_before_credits = %tax_before_credits,
            credits = %credits,
            federal_income_tax = %federal_income_tax,
            "federal income tax calculated"
        );

        FederalTaxResult {
            taxable_income,
            slices,
            tax_before_credits,
            credits,
            federal_income_tax,
            untaxed_income,
        }
    }

    /// Walks the schedule, returning the slices taxed and any income left untaxed.
    fn walk_brackets(
        &self,
        taxable_income: Decimal,
    ) -> (Vec<BracketSlice>, Decimal) {
        let mut slices = Vec::with_capacity(self.schedule.len() + 1);
        let mut previous = Decimal::ZERO;

        for bracket in self.schedule.brackets() {
            if taxable_income > bracket.threshold {
                slices.push(slice(
                    previous,
                    Some(bracket.threshold),
                    bracket.rate,
                    bracket.threshold - previous,
                ));
                previous = bracket.threshold;
            } else {
                slices.push(slice(
                    previous,
                    Some(bracket.threshold),
                    bracket.rate,
                    taxable_income - previous,
                ));
                return (slices, Decimal::ZERO);
            }
        }

        // Income is above every threshold.
        let top = self.schedule.top();
        let remainder = taxable_income - top.threshold;
        match self.policy {
            TopBracketPolicy::Unbounded => {
                slices.push(slice(top.threshold, None, top.rate, remainder));
                (slices, Decimal::ZERO)
            }
            TopBracketPolicy::Capped => {
                warn!(
                    taxable_income = %taxable_income,
                    top_threshold = %top.threshold,
                    untaxed = %remainder,
                    "Income above the last bracket threshold is not taxed"
                );
                (slices, remainder)
            }
        }
    }
}

fn slice(
    lower: Decimal,
    upper: Option<Decimal>,
    rate: Decimal,
    taxed_amount: Decimal,
) -> BracketSlice {
    BracketSlice {
        lower,
        upper,
        rate,
        taxed_amount,
        tax: taxed_amount * rate,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn schedule() -> BracketSchedule {
        BracketSchedule::new(vec![
            TaxBracket::new(dec!(10000), dec!(0.10)),
            TaxBracket::new(dec!(40000), dec!(0.12)),
            TaxBracket::new(dec!(90000), dec!(0.22)),
            TaxBracket::new(dec!(170000), dec!(0.24)),
        ])
        .unwrap()
    }

    fn credits(total: Decimal) -> AmountSet {
        AmountSet::from_pairs("tax credits", [("Credit".to_string(), total)]).unwrap()
    }

    fn tax_for(
        income: Decimal,
        policy: TopBracketPolicy,
    ) -> FederalTaxResult {
        let schedule = schedule();
        FederalTaxEngine::new(&schedule, policy).calculate(income, &AmountSet::new())
    }

    // =========================================================================
    // Bracket walk
    // =========================================================================

    #[test]
    fn hand_computed_example_matches() {
        let result = tax_for(dec!(100000), TopBracketPolicy::Unbounded);

        assert_eq!(result.tax_before_credits, dec!(18000));
        let taxes: Vec<_> = result.slices.iter().map(|s| s.tax).collect();
        assert_eq!(taxes, vec![dec!(1000), dec!(3600), dec!(11000), dec!(2400)]);
    }

    #[test]
    fn income_within_first_bracket() {
        let result = tax_for(dec!(5000), TopBracketPolicy::Unbounded);

        assert_eq!(result.tax_before_credits, dec!(500));
        assert_eq!(result.slices.len(), 1);
    }

    #[test]
    fn income_equal_to_threshold_stops_in_that_bracket() {
        let result = tax_for(dec!(40000), TopBracketPolicy::Unbounded);

        // 10000×0.10 + 30000×0.12, and the 22% bracket is never reached.
        assert_eq!(result.tax_before_credits, dec!(4600));
        assert_eq!(result.slices.len(), 2);
        assert_eq!(
            result.slices[1],
            BracketSlice {
                lower: dec!(10000),
                upper: Some(dec!(40000)),
                rate: dec!(0.12),
                taxed_amount: dec!(30000),
                tax: dec!(3600),
            }
        );
    }

    #[test]
    fn income_one_cent_over_threshold_enters_next_bracket() {
        let result = tax_for(dec!(40000.01), TopBracketPolicy::Unbounded);

        assert_eq!(result.slices.len(), 3);
        assert_eq!(result.slices[2].taxed_amount, dec!(0.01));
        assert_eq!(result.tax_before_credits, dec!(4600.0022));
    }

    #[test]
    fn zero_income_owes_nothing() {
        let result = tax_for(Decimal::ZERO, TopBracketPolicy::Unbounded);

        assert_eq!(result.tax_before_credits, Decimal::ZERO);
    }

    #[test]
    fn negative_income_yields_negative_first_bracket_tax() {
        let result = tax_for(dec!(-5000), TopBracketPolicy::Unbounded);

        assert_eq!(result.slices.len(), 1);
        assert_eq!(result.slices[0].taxed_amount, dec!(-5000));
        assert_eq!(result.tax_before_credits, dec!(-500));
    }

    // =========================================================================
    // Top bracket policy
    // =========================================================================

    #[test]
    fn income_equal_to_last_threshold_needs_no_extension() {
        let unbounded = tax_for(dec!(170000), TopBracketPolicy::Unbounded);
        let capped = tax_for(dec!(170000), TopBracketPolicy::Capped);

        assert_eq!(unbounded.tax_before_credits, dec!(34800));
        assert_eq!(capped, unbounded);
    }

    #[test]
    fn unbounded_policy_taxes_income_above_last_threshold() {
        let result = tax_for(dec!(200000), TopBracketPolicy::Unbounded);

        // 34800 for the explicit brackets + 30000×0.24 above the top.
        assert_eq!(result.tax_before_credits, dec!(42000));
        assert_eq!(result.untaxed_income, Decimal::ZERO);
        let last = result.slices.last().unwrap();
        assert_eq!(last.upper, None);
        assert_eq!(last.lower, dec!(170000));
        assert_eq!(last.taxed_amount, dec!(30000));
    }

    #[test]
    fn capped_policy_leaves_income_above_last_threshold_untaxed() {
        let result = tax_for(dec!(200000), TopBracketPolicy::Capped);

        assert_eq!(result.tax_before_credits, dec!(34800));
        assert_eq!(result.untaxed_income, dec!(30000));
        assert_eq!(result.slices.len(), 4);
    }

    // =========================================================================
    // Credits
    // =========================================================================

    #[test]
    fn credits_are_subtracted_after_bracket_tax() {
        let schedule = schedule();
        let engine = FederalTaxEngine::new(&schedule, TopBracketPolicy::Unbounded);

        let result = engine.calculate(dec!(100000), &credits(dec!(2000)));

        assert_eq!(result.credits, dec!(2000));
        assert_eq!(result.federal_income_tax, dec!(16000));
    }

    #[test]
    fn credits_larger_than_tax_give_negative_result() {
        let schedule = schedule();
        let engine = FederalTaxEngine::new(&schedule, TopBracketPolicy::Unbounded);

        let result = engine.calculate(dec!(5000), &credits(dec!(2000)));

        assert_eq!(result.federal_income_tax, dec!(-1500));
    }
}
