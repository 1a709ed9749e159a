//! Request types for the Policy Impact Engine API.
//!
//! This module defines the JSON request body shared by the `/compare` and
//! `/regimes/:regime_id/impact` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FilingStatus, HouseholdProfile};

/// Household information submitted by the input form.
///
/// `age`, `students` and `zip_code` are collected by the form but play no
/// part in the calculation; they are accepted so that a full form
/// submission deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdRequest {
    /// Annual household income.
    pub income: Decimal,
    /// Number of qualifying dependents.
    pub dependents: i32,
    /// The household's filing status.
    pub filing_status: FilingStatus,
    /// Age of the primary filer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Number of students in college.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<u32>,
    /// Five-digit zip code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl From<HouseholdRequest> for HouseholdProfile {
    fn from(req: HouseholdRequest) -> Self {
        HouseholdProfile::new(req.income, req.dependents, req.filing_status)
    }
}
