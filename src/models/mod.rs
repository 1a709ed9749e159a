//! Core data models for the Policy Impact Engine.
//!
//! This module contains the household input, filing status and result
//! models used throughout the engine.

mod filing_status;
mod household;
mod impact_result;

pub use filing_status::FilingStatus;
pub use household::HouseholdProfile;
pub(crate) use household::validate_dependents;
pub use impact_result::{
    AuditStep, AuditTrace, AuditWarning, PolicyComparison, PolicyImpactReport, PolicyImpactResult,
};
