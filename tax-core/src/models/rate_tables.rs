use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, FilingStatus, ValidationError};

/// Payroll tax rates read from the FICA table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FicaRates {
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub medicare_surtax: Decimal,
}

impl FicaRates {
    pub const TABLE: &'static str = "FICA rates";
    pub const SOCIAL_SECURITY_KEY: &'static str = "Social Security";
    pub const MEDICARE_KEY: &'static str = "Medicare Tax";
    pub const MEDICARE_SURTAX_KEY: &'static str = "Medicare Surtax";

    /// Extracts the three required rates from a key/value table.
    ///
    /// Extra keys are ignored.
    pub fn from_table(table: &HashMap<String, Decimal>) -> Result<Self, ConfigError> {
        Ok(Self {
            social_security: required(table, Self::TABLE, Self::SOCIAL_SECURITY_KEY)?,
            medicare: required(table, Self::TABLE, Self::MEDICARE_KEY)?,
            medicare_surtax: required(table, Self::TABLE, Self::MEDICARE_SURTAX_KEY)?,
        })
    }

    /// Checks every rate lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, rate) in [
            (Self::SOCIAL_SECURITY_KEY, self.social_security),
            (Self::MEDICARE_KEY, self.medicare),
            (Self::MEDICARE_SURTAX_KEY, self.medicare_surtax),
        ] {
            check_rate(name, rate)?;
        }
        Ok(())
    }
}

/// How filing statuses map onto the Medicare surtax threshold table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurtaxPolicy {
    /// Every status needs its own entry; a missing one is an error.
    #[default]
    Strict,
    /// Single uses "Single" and every other status uses "Jointly".
    Legacy,
}

/// Income above which the Medicare surtax applies, keyed by filing status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurtaxThresholds {
    thresholds: HashMap<String, Decimal>,
}

impl SurtaxThresholds {
    pub const TABLE: &'static str = "Medicare surtax thresholds";
    pub const JOINTLY_KEY: &'static str = "Jointly";

    pub fn new(thresholds: HashMap<String, Decimal>) -> Self {
        Self { thresholds }
    }

    /// Keys accepted for `status`, most specific first.
    pub fn keys_for(status: FilingStatus) -> &'static [&'static str] {
        match status {
            FilingStatus::Single => &["Single"],
            FilingStatus::MarriedFilingJointly => &["Married Filing Jointly", "Jointly"],
            FilingStatus::MarriedFilingSeparately => &["Married Filing Separately", "Separately"],
            FilingStatus::HeadOfHousehold => &["Head of Household"],
        }
    }

    /// Resolves the threshold for `status` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] naming the most specific key when
    /// no accepted key is present.
    pub fn threshold_for(
        &self,
        status: FilingStatus,
        policy: SurtaxPolicy,
    ) -> Result<Decimal, ConfigError> {
        let keys: &[&str] = match (policy, status) {
            (SurtaxPolicy::Legacy, FilingStatus::Single) => &["Single"],
            (SurtaxPolicy::Legacy, _) => &[Self::JOINTLY_KEY],
            (SurtaxPolicy::Strict, status) => Self::keys_for(status),
        };

        keys.iter()
            .find_map(|key| self.thresholds.get(*key).copied())
            .ok_or_else(|| ConfigError::MissingKey {
                table: Self::TABLE,
                key: keys[0].to_string(),
            })
    }
}

/// Flat-rate state income tax parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTaxInfo {
    pub personal_exemption: Decimal,
    pub flat_rate: Decimal,
}

impl StateTaxInfo {
    pub const TABLE: &'static str = "state tax info";
    pub const PERSONAL_EXEMPTION_KEY: &'static str = "Personal Exemption";
    pub const FLAT_RATE_KEY: &'static str = "Flat Tax Rate";

    pub fn from_table(table: &HashMap<String, Decimal>) -> Result<Self, ConfigError> {
        Ok(Self {
            personal_exemption: required(table, Self::TABLE, Self::PERSONAL_EXEMPTION_KEY)?,
            flat_rate: required(table, Self::TABLE, Self::FLAT_RATE_KEY)?,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_rate(Self::FLAT_RATE_KEY, self.flat_rate)
    }
}

fn required(
    table: &HashMap<String, Decimal>,
    table_name: &'static str,
    key: &str,
) -> Result<Decimal, ConfigError> {
    table
        .get(key)
        .copied()
        .ok_or_else(|| ConfigError::MissingKey {
            table: table_name,
            key: key.to_string(),
        })
}

fn check_rate(
    name: &str,
    rate: Decimal,
) -> Result<(), ValidationError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::RateOutOfRange {
            name: name.to_string(),
            rate,
        });
    }
    Ok(())
}
