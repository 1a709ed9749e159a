//! Policy impact result models.
//!
//! This module contains the [`PolicyImpactResult`] returned by the core
//! calculation, the [`PolicyImpactReport`] and [`PolicyComparison`] wrappers
//! handed to the presentation layer, and the audit trace structures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::round_currency;

/// The effect of one policy regime on one household.
///
/// Values are unrounded; rounding is a presentation concern, see
/// [`PolicyImpactResult::rounded`].
///
/// # Example
///
/// ```
/// use policy_impact_engine::models::PolicyImpactResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = PolicyImpactResult {
///     tax_owed: Decimal::from_str("18289.5").unwrap(),
///     child_credit_amount: Decimal::from(2000),
/// };
/// assert_eq!(result.rounded().tax_owed.to_string(), "18289.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyImpactResult {
    /// Federal income tax owed.
    pub tax_owed: Decimal,
    /// Child tax credit after phaseout.
    pub child_credit_amount: Decimal,
}

impl PolicyImpactResult {
    /// Returns a copy with both amounts rounded half-up to cents for display.
    pub fn rounded(&self) -> Self {
        Self {
            tax_owed: round_currency(self.tax_owed),
            child_credit_amount: round_currency(self.child_credit_amount),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The regime whose parameters were used.
    pub regime_id: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag outcomes that are correct but worth pointing out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A policy impact result together with its provenance and audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyImpactReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The regime that was evaluated.
    pub regime_id: String,
    /// Display name of the regime.
    pub regime_name: String,
    /// The computed impact.
    pub impact: PolicyImpactResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// Reports for every registered regime evaluated against one household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyComparison {
    /// Unique identifier for this comparison.
    pub calculation_id: Uuid,
    /// When the comparison was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the comparison.
    pub engine_version: String,
    /// One report per regime, in registry order.
    pub reports: Vec<PolicyImpactReport>,
}

impl PolicyComparison {
    /// Finds the report for a regime id.
    pub fn report(&self, regime_id: &str) -> Option<&PolicyImpactReport> {
        self.reports.iter().find(|r| r.regime_id == regime_id)
    }
}
