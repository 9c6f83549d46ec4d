use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{FilingStatus, ValidationError};

/// One row of the standard deduction source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeduction {
    pub label: String,
    pub amount: Decimal,
}

/// Standard deduction per filing status.
///
/// Rows are matched to filing statuses by position: the first row belongs to
/// [`FilingStatus::Single`], the second to
/// [`FilingStatus::MarriedFilingJointly`], and so on. Labels are kept for
/// display only and play no part in the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardDeductionTable {
    entries: [StandardDeduction; 4],
}

impl StandardDeductionTable {
    /// Builds the table from rows in source order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::StandardDeductionCount`] unless exactly
    /// four rows are supplied.
    pub fn from_rows(rows: Vec<StandardDeduction>) -> Result<Self, ValidationError> {
        let found = rows.len();
        let entries: [StandardDeduction; 4] =
            rows.try_into()
                .map_err(|_| ValidationError::StandardDeductionCount {
                    expected: FilingStatus::ALL.len(),
                    found,
                })?;

        for (status, entry) in FilingStatus::ALL.iter().zip(&entries) {
            tracing::debug!(
                status = status.as_str(),
                label = %entry.label,
                amount = %entry.amount,
                "standard deduction assigned by position"
            );
        }

        Ok(Self { entries })
    }

    pub fn amount_for(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.entries[status.index()].amount
    }

    pub fn entry_for(
        &self,
        status: FilingStatus,
    ) -> &StandardDeduction {
        &self.entries[status.index()]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn row(
        label: &str,
        amount: Decimal,
    ) -> StandardDeduction {
        StandardDeduction {
            label: label.to_string(),
            amount,
        }
    }

    fn sample_rows() -> Vec<StandardDeduction> {
        vec![
            row("Single", dec!(15000)),
            row("Married Filing Jointly", dec!(30000)),
            row("Married Filing Separately", dec!(15000)),
            row("Head of Household", dec!(22500)),
        ]
    }

    #[test]
    fn amounts_follow_row_position() {
        let table = StandardDeductionTable::from_rows(sample_rows()).unwrap();

        assert_eq!(table.amount_for(FilingStatus::Single), dec!(15000));
        assert_eq!(table.amount_for(FilingStatus::MarriedFilingJointly), dec!(30000));
        assert_eq!(table.amount_for(FilingStatus::MarriedFilingSeparately), dec!(15000));
        assert_eq!(table.amount_for(FilingStatus::HeadOfHousehold), dec!(22500));
    }

    #[test]
    fn labels_are_not_used_for_lookup() {
        let mut rows = sample_rows();
        rows[0].label = "Head of Household".to_string();

        let table = StandardDeductionTable::from_rows(rows).unwrap();

        assert_eq!(table.amount_for(FilingStatus::Single), dec!(15000));
        assert_eq!(table.entry_for(FilingStatus::Single).label, "Head of Household");
    }

    #[test]
    fn rejects_too_few_rows() {
        let mut rows = sample_rows();
        rows.pop();

        assert_eq!(
            StandardDeductionTable::from_rows(rows),
            Err(ValidationError::StandardDeductionCount {
                expected: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn rejects_too_many_rows() {
        let mut rows = sample_rows();
        rows.push(row("Qualifying Surviving Spouse", dec!(30000)));

        assert_eq!(
            StandardDeductionTable::from_rows(rows),
            Err(ValidationError::StandardDeductionCount {
                expected: 4,
                found: 5,
            })
        );
    }
}
