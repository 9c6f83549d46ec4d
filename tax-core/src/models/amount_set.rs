use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{ConfigError, TaxError, ValidationError};

/// Named monetary amounts that are only ever summed, such as deductions or
/// credits. Names are unique; order is irrelevant.
///
/// The total is computed once at construction, so a set whose sum does not
/// fit in a [`Decimal`] cannot be built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmountSet {
    amounts: HashMap<String, Decimal>,
    total: Decimal,
}

impl AmountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(name, amount)` pairs.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateKey`] if a name appears twice
    /// - [`ValidationError::AmountOverflow`] if the amounts sum past
    ///   [`Decimal::MAX`] or below [`Decimal::MIN`]
    pub fn from_pairs<I>(
        table: &'static str,
        pairs: I,
    ) -> Result<Self, TaxError>
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut amounts = HashMap::new();
        let mut total = Decimal::ZERO;
        for (name, amount) in pairs {
            if amounts.contains_key(&name) {
                return Err(ConfigError::DuplicateKey { table, key: name }.into());
            }
            total = total
                .checked_add(amount)
                .ok_or(ValidationError::AmountOverflow { table })?;
            amounts.insert(name, amount);
        }
        Ok(Self { amounts, total })
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn total_sums_every_amount() {
        let set = AmountSet::from_pairs(
            "deductions",
            [
                ("401(k)".to_string(), dec!(19500.00)),
                ("HSA".to_string(), dec!(3550.50)),
            ],
        )
        .unwrap();

        assert_eq!(set.total(), dec!(23050.50));
        assert!(!set.is_empty());
    }

    #[test]
    fn empty_set_totals_zero() {
        assert_eq!(AmountSet::new().total(), Decimal::ZERO);
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = AmountSet::from_pairs(
            "tax credits",
            [
                ("Child".to_string(), dec!(2000)),
                ("Child".to_string(), dec!(1000)),
            ],
        );

        assert_eq!(
            result,
            Err(TaxError::Config(ConfigError::DuplicateKey {
                table: "tax credits",
                key: "Child".to_string(),
            }))
        );
    }

    #[test]
    fn rejects_amounts_whose_sum_overflows() {
        let result = AmountSet::from_pairs(
            "above-the-line deductions",
            [
                ("Pension".to_string(), Decimal::MAX),
                ("HSA".to_string(), dec!(1)),
            ],
        );

        assert_eq!(
            result,
            Err(TaxError::Validation(ValidationError::AmountOverflow {
                table: "above-the-line deductions",
            }))
        );
    }

    #[test]
    fn offsetting_amounts_near_the_limit_are_accepted() {
        let set = AmountSet::from_pairs(
            "tax credits",
            [
                ("Large".to_string(), Decimal::MAX),
                ("Clawback".to_string(), dec!(-1)),
            ],
        )
        .unwrap();

        assert_eq!(set.total(), Decimal::MAX - dec!(1));
    }
}
