//! Household profile model.
//!
//! This module defines the [`HouseholdProfile`] consumed by every calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;
use crate::error::{EngineError, EngineResult};

/// The household inputs a policy impact is computed for.
///
/// `dependents` is signed so that a negative count coming from an untrusted
/// form can be rejected with a validation error instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    /// Annual household income in dollars.
    pub income: Decimal,
    /// Number of qualifying dependents.
    pub dependents: i32,
    /// The household's filing status.
    pub filing_status: FilingStatus,
}

impl HouseholdProfile {
    /// Creates a new household profile.
    ///
    /// The profile is not validated here; see [`HouseholdProfile::validate`].
    pub fn new(income: Decimal, dependents: i32, filing_status: FilingStatus) -> Self {
        Self {
            income,
            dependents,
            filing_status,
        }
    }

    /// Checks that income and dependents are non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use policy_impact_engine::models::{FilingStatus, HouseholdProfile};
    /// use rust_decimal::Decimal;
    ///
    /// let profile = HouseholdProfile::new(Decimal::from(50_000), -1, FilingStatus::Single);
    /// assert!(profile.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.income < Decimal::ZERO {
            return Err(EngineError::InvalidProfile {
                field: "income".to_string(),
                message: format!("must not be negative (got {})", self.income),
            });
        }
        validate_dependents(self.dependents)
    }
}

/// Rejects a negative dependent count.
pub(crate) fn validate_dependents(dependents: i32) -> EngineResult<()> {
    if dependents < 0 {
        return Err(EngineError::InvalidProfile {
            field: "dependents".to_string(),
            message: format!("must not be negative (got {})", dependents),
        });
    }
    Ok(())
}
