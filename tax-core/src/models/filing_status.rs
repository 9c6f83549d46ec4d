use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// The four filing statuses, in the order the standard deduction table lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
    ];

    /// 1-based ordinal used by the interactive menu.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::MarriedFilingJointly => 2,
            Self::MarriedFilingSeparately => 3,
            Self::HeadOfHousehold => 4,
        }
    }

    /// 0-based position into enum-indexed tables.
    pub fn index(&self) -> usize {
        usize::from(self.ordinal() - 1)
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self, ValidationError> {
        match ordinal {
            1 => Ok(Self::Single),
            2 => Ok(Self::MarriedFilingJointly),
            3 => Ok(Self::MarriedFilingSeparately),
            4 => Ok(Self::HeadOfHousehold),
            other => Err(ValidationError::InvalidFilingStatus(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the menu ordinal (`"1"`..`"4"`) or a short code (`"MFJ"`).
impl FromStr for FilingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u8>() {
            return Self::from_ordinal(ordinal);
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "S" => Ok(Self::Single),
            "MFJ" => Ok(Self::MarriedFilingJointly),
            "MFS" => Ok(Self::MarriedFilingSeparately),
            "HOH" => Ok(Self::HeadOfHousehold),
            _ => Err(ValidationError::InvalidFilingStatus(trimmed.to_string())),
        }
    }
}
