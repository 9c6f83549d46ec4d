use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One marginal tier: income up to `threshold` (and above the previous
/// bracket's threshold) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// Brackets in source order with strictly ascending thresholds.
///
/// The order is never changed after construction; a schedule that is out of
/// order is rejected rather than sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates and wraps the brackets.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if:
    /// - `brackets` is empty
    /// - the first threshold is not positive, or any later threshold is not
    ///   greater than the one before it
    /// - any rate lies outside `[0, 1]`
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ValidationError> {
        if brackets.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ValidationError::RateOutOfRange {
                    name: format!("bracket {index}"),
                    rate: bracket.rate,
                });
            }
            // The bracket walk starts at zero, so the first threshold must exceed it.
            let previous = match index {
                0 => Decimal::ZERO,
                _ => brackets[index - 1].threshold,
            };
            if bracket.threshold <= previous {
                return Err(ValidationError::NonAscendingThreshold {
                    index,
                    previous,
                    threshold: bracket.threshold,
                });
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The highest bracket; its rate is the top marginal rate.
    pub fn top(&self) -> &TaxBracket {
        // Non-empty by construction.
        &self.brackets[self.brackets.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}
