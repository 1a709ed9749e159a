//! Federal tax calculation under a policy regime.
//!
//! This module resolves the regime's bracket table for a filing status,
//! applies progressive taxation, and layers the regime's high-income surtax
//! on the income above the surtax threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PolicyRegime;
use crate::error::EngineResult;
use crate::models::{AuditStep, FilingStatus};

use super::progressive_tax::{BracketSlice, progressive_slices};

/// How a high-income surtax was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurtaxApplication {
    /// Income up to which the progressive table applied.
    pub threshold: Decimal,
    /// Flat rate applied above the threshold.
    pub rate: Decimal,
    /// Income above the threshold.
    pub excess_income: Decimal,
    /// `excess_income * rate`.
    pub tax: Decimal,
}

/// The result of a tax calculation, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct TaxImpactResult {
    /// Total federal tax owed.
    pub tax_owed: Decimal,
    /// Progressive slices (up to the surtax threshold when one applied).
    pub slices: Vec<BracketSlice>,
    /// The surtax portion, if the income exceeded the threshold.
    pub surtax: Option<SurtaxApplication>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates federal tax owed for an income under a regime.
///
/// Progressive taxation is applied to the whole income unless the regime
/// declares a surtax and the income exceeds its threshold for the filing
/// status. In that case the table applies up to the threshold and the surtax
/// rate applies to the excess only. At exactly the threshold the result is
/// the plain progressive tax.
///
/// # Arguments
///
/// * `income` - Household income; zero or less owes nothing
/// * `filing_status` - Selects the bracket table and surtax threshold
/// * `regime` - The policy regime to evaluate
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// - `BracketTableNotFound` if the regime has no table for the status
/// - `SurtaxThresholdNotFound` if the regime's surtax omits the status
pub fn calculate_tax_impact(
    income: Decimal,
    filing_status: FilingStatus,
    regime: &PolicyRegime,
    step_number: u32,
) -> EngineResult<TaxImpactResult> {
    let table = regime.bracket_table(filing_status)?;

    let surtax = match regime.surtax_for(filing_status)? {
        Some((threshold, rate)) if income > threshold => {
            let excess_income = income - threshold;
            Some(SurtaxApplication {
                threshold,
                rate,
                excess_income,
                tax: excess_income * rate,
            })
        }
        _ => None,
    };

    let progressive_income = surtax.map_or(income, |s| s.threshold);
    let slices = progressive_slices(progressive_income, table);
    let progressive_total: Decimal = slices.iter().map(|s| s.tax).sum();
    let tax_owed = progressive_total + surtax.map_or(Decimal::ZERO, |s| s.tax);

    let reasoning = match &surtax {
        Some(s) => format!(
            "Progressive tax on ${} = ${}; surtax ${} x {} = ${}; total ${}",
            s.threshold.normalize(),
            progressive_total.normalize(),
            s.excess_income.normalize(),
            s.rate.normalize(),
            s.tax.normalize(),
            tax_owed.normalize()
        ),
        None => format!(
            "Progressive tax on ${} across {} bracket(s) = ${}",
            income.max(Decimal::ZERO).normalize(),
            slices.len(),
            tax_owed.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "federal_tax".to_string(),
        rule_name: "Federal Income Tax".to_string(),
        regime_id: regime.id.clone(),
        input: serde_json::json!({
            "income": income.normalize().to_string(),
            "filing_status": filing_status.as_str()
        }),
        output: serde_json::json!({
            "tax_owed": tax_owed.normalize().to_string(),
            "brackets_used": slices.len(),
            "surtax_applied": surtax.is_some()
        }),
        reasoning,
    };

    Ok(TaxImpactResult {
        tax_owed,
        slices,
        surtax,
        audit_step,
    })
}

/// Computes federal tax owed for an income under a regime.
///
/// Shorthand for [`calculate_tax_impact`] without the breakdown.
pub fn compute_tax(
    income: Decimal,
    filing_status: FilingStatus,
    regime: &PolicyRegime,
) -> EngineResult<Decimal> {
    calculate_tax_impact(income, filing_status, regime, 1).map(|r| r.tax_owed)
}
