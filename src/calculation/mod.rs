//! Calculation logic for the Policy Impact Engine.
//!
//! This module contains progressive bracket taxation, the regime-aware
//! federal tax calculation with its high-income surtax, the phased-out child
//! tax credit, and the orchestration that combines them into policy impact
//! results and regime comparisons.

mod child_credit;
mod common;
mod policy_impact;
mod progressive_tax;
mod tax_impact;

pub use child_credit::{
    CREDIT_FULLY_PHASED_OUT, ChildCreditResult, calculate_child_credit, compute_child_credit,
};
pub use common::round_currency;
pub use policy_impact::{calculate_policy_impact, compare_regimes, compute_policy_impact};
pub use progressive_tax::{BracketSlice, progressive_slices, progressive_tax};
pub use tax_impact::{SurtaxApplication, TaxImpactResult, calculate_tax_impact, compute_tax};
