//! Filing status model.
//!
//! A filing status selects which bracket table, surtax threshold and credit
//! phaseout threshold apply to a household.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The federal filing status of a household.
///
/// Regimes key their per-status configuration by this enum. A status with no
/// configuration in a regime is reported as a configuration error, never
/// treated as `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Unmarried filer.
    Single,
    /// Married couple filing a joint return.
    #[serde(alias = "marriedFilingJointly")]
    MarriedFilingJointly,
    /// Married filer filing a separate return.
    #[serde(alias = "marriedFilingSeparately")]
    MarriedFilingSeparately,
    /// Unmarried filer maintaining a home for a qualifying person.
    #[serde(alias = "headOfHousehold")]
    HeadOfHousehold,
}

impl FilingStatus {
    /// All known filing statuses, in declaration order.
    pub const ALL: [FilingStatus; 4] = [
        FilingStatus::Single,
        FilingStatus::MarriedFilingJointly,
        FilingStatus::MarriedFilingSeparately,
        FilingStatus::HeadOfHousehold,
    ];

    /// Returns the canonical snake_case name used in configuration files.
    ///
    /// # Examples
    ///
    /// ```
    /// use policy_impact_engine::models::FilingStatus;
    ///
    /// assert_eq!(FilingStatus::MarriedFilingJointly.as_str(), "married_filing_jointly");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedFilingJointly => "married_filing_jointly",
            FilingStatus::MarriedFilingSeparately => "married_filing_separately",
            FilingStatus::HeadOfHousehold => "head_of_household",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = EngineError;

    /// Parses either the snake_case or the camelCase spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(FilingStatus::Single),
            "married_filing_jointly" | "marriedFilingJointly" => {
                Ok(FilingStatus::MarriedFilingJointly)
            }
            "married_filing_separately" | "marriedFilingSeparately" => {
                Ok(FilingStatus::MarriedFilingSeparately)
            }
            "head_of_household" | "headOfHousehold" => Ok(FilingStatus::HeadOfHousehold),
            other => Err(EngineError::UnsupportedFilingStatus {
                value: other.to_string(),
            }),
        }
    }
}
