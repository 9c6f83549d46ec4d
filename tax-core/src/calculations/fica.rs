//! FICA payroll tax: Social Security, Medicare, and the Medicare surtax.
//!
//! FICA is charged on gross income, not AGI, and is independent of the
//! federal income tax calculation.
//!
//! | Portion          | Base                                   |
//! |------------------|----------------------------------------|
//! | Social Security  | `min(income, wage base)`               |
//! | Medicare         | `income`                               |
//! | Medicare surtax  | `max(0, income - filing threshold)`    |
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use rust_decimal_macros::dec;
//! use tax_core::{FicaRates, FilingStatus, SurtaxPolicy, SurtaxThresholds};
//! use tax_core::calculations::FicaEngine;
//!
//! let rates = FicaRates {
//!     social_security: dec!(0.062),
//!     medicare: dec!(0.0145),
//!     medicare_surtax: dec!(0.009),
//! };
//! let thresholds = SurtaxThresholds::new(HashMap::from([
//!     ("Single".to_string(), dec!(200000)),
//!     ("Jointly".to_string(), dec!(250000)),
//! ]));
//!
//! let engine = FicaEngine::new(&rates, &thresholds, dec!(176100), SurtaxPolicy::Strict);
//! let result = engine.calculate(dec!(201000), FilingStatus::Single).unwrap();
//!
//! assert_eq!(result.social_security, dec!(10918.2));
//! assert_eq!(result.medicare_surtax, dec!(9.000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{excess_over_zero, min};
use crate::{ConfigError, FicaRates, FilingStatus, SurtaxPolicy, SurtaxThresholds};

/// Result of the FICA step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaResult {
    /// Income subject to Social Security tax after the wage base cap.
    pub ss_taxable_income: Decimal,
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub surtax_threshold: Decimal,
    pub medicare_surtax: Decimal,
    pub total: Decimal,
}

/// Calculator for FICA payroll tax.
#[derive(Debug, Clone)]
pub struct FicaEngine<'a> {
    rates: &'a FicaRates,
    thresholds: &'a SurtaxThresholds,
    ss_wage_base: Decimal,
    policy: SurtaxPolicy,
}

impl<'a> FicaEngine<'a> {
    pub fn new(
        rates: &'a FicaRates,
        thresholds: &'a SurtaxThresholds,
        ss_wage_base: Decimal,
        policy: SurtaxPolicy,
    ) -> Self {
        Self {
            rates,
            thresholds,
            ss_wage_base,
            policy,
        }
    }

    /// Calculates all three FICA portions on `total_income`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if the surtax threshold table has
    /// no entry for `status` under the engine's [`SurtaxPolicy`].
    pub fn calculate(
        &self,
        total_income: Decimal,
        status: FilingStatus,
    ) -> Result<FicaResult, ConfigError> {
        let surtax_threshold = self.thresholds.threshold_for(status, self.policy)?;

        let ss_taxable_income = min(total_income, self.ss_wage_base);
        let social_security = ss_taxable_income * self.rates.social_security;
        let medicare = total_income * self.rates.medicare;
        let medicare_surtax = self.medicare_surtax(total_income, surtax_threshold);
        let total = social_security + medicare + medicare_surtax;

        debug!(
            status = status.as_str(),
            social_security = %social_security,
            medicare = %medicare,
            medicare_surtax = %medicare_surtax,
            "FICA calculated"
        );

        Ok(FicaResult {
            ss_taxable_income,
            social_security,
            medicare,
            surtax_threshold,
            medicare_surtax,
            total,
        })
    }

    /// Surtax on the excess over the threshold only; zero at or below it.
    fn medicare_surtax(
        &self,
        total_income: Decimal,
        threshold: Decimal,
    ) -> Decimal {
        excess_over_zero(total_income - threshold) * self.rates.medicare_surtax
    }
}
