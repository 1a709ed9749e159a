//! Child tax credit calculation.
//!
//! The credit is a flat amount per dependent, reduced linearly by the
//! regime's phaseout rate for every dollar of income above the phaseout
//! threshold, and never negative. The linear reduction approximates the
//! statutory step-down and is intentional.

use rust_decimal::Decimal;

use crate::config::PolicyRegime;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, FilingStatus, validate_dependents};

/// Warning code recorded when the phaseout removes a non-zero credit entirely.
pub const CREDIT_FULLY_PHASED_OUT: &str = "CHILD_CREDIT_FULLY_PHASED_OUT";

/// The result of a child credit calculation.
#[derive(Debug, Clone)]
pub struct ChildCreditResult {
    /// Credit before phaseout (`dependents * per_dependent`).
    pub base_credit: Decimal,
    /// Reduction from income above the threshold (may exceed the base).
    pub phaseout_reduction: Decimal,
    /// The final credit, floored at zero.
    pub credit_amount: Decimal,
    /// Warning when the credit was fully phased out.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the phased-out child tax credit.
///
/// # Errors
///
/// - `InvalidProfile` if `dependents` is negative
/// - `PhaseoutThresholdNotFound` if the regime has no threshold for the status
pub fn calculate_child_credit(
    income: Decimal,
    dependents: i32,
    filing_status: FilingStatus,
    regime: &PolicyRegime,
    step_number: u32,
) -> EngineResult<ChildCreditResult> {
    validate_dependents(dependents)?;

    let params = &regime.child_credit;
    let base_credit = Decimal::from(dependents) * params.per_dependent;
    let threshold = regime.phaseout_threshold(filing_status)?;

    let phaseout_reduction = if income > threshold {
        (income - threshold) * params.phaseout_rate
    } else {
        Decimal::ZERO
    };
    let credit_amount = (base_credit - phaseout_reduction).max(Decimal::ZERO);

    let warning = (base_credit > Decimal::ZERO && credit_amount.is_zero()).then(|| AuditWarning {
        code: CREDIT_FULLY_PHASED_OUT.to_string(),
        message: format!(
            "Income ${} exceeds the ${} threshold by enough to eliminate the ${} credit",
            income.normalize(),
            threshold.normalize(),
            base_credit.normalize()
        ),
        severity: "low".to_string(),
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "child_tax_credit".to_string(),
        rule_name: "Child Tax Credit".to_string(),
        regime_id: regime.id.clone(),
        input: serde_json::json!({
            "income": income.normalize().to_string(),
            "dependents": dependents,
            "filing_status": filing_status.as_str(),
            "per_dependent": params.per_dependent.normalize().to_string(),
            "phaseout_threshold": threshold.normalize().to_string(),
            "phaseout_rate": params.phaseout_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_credit": base_credit.normalize().to_string(),
            "phaseout_reduction": phaseout_reduction.normalize().to_string(),
            "credit_amount": credit_amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} x ${} = ${}, less phaseout ${} = ${}",
            dependents,
            params.per_dependent.normalize(),
            base_credit.normalize(),
            phaseout_reduction.normalize(),
            credit_amount.normalize()
        ),
    };

    Ok(ChildCreditResult {
        base_credit,
        phaseout_reduction,
        credit_amount,
        warning,
        audit_step,
    })
}

/// Computes the phased-out child tax credit amount.
pub fn compute_child_credit(
    income: Decimal,
    dependents: i32,
    filing_status: FilingStatus,
    regime: &PolicyRegime,
) -> EngineResult<Decimal> {
    calculate_child_credit(income, dependents, filing_status, regime, 1).map(|r| r.credit_amount)
}
