//! Policy impact orchestration.
//!
//! Combines the federal tax and child credit calculations for one household
//! under one regime, or under every registered regime.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::{PolicyRegime, RegimeRegistry};
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, HouseholdProfile, PolicyComparison, PolicyImpactReport, PolicyImpactResult,
};

use super::child_credit::calculate_child_credit;
use super::tax_impact::calculate_tax_impact;

/// Computes the impact of a regime on a household.
///
/// The profile is validated first; a negative income or dependent count
/// fails without producing a partial result. Tax and credit are computed
/// independently of each other.
///
/// # Examples
///
/// ```no_run
/// use policy_impact_engine::calculation::compute_policy_impact;
/// use policy_impact_engine::config::RegimeRegistry;
/// use policy_impact_engine::models::{FilingStatus, HouseholdProfile};
/// use rust_decimal::Decimal;
///
/// let registry = RegimeRegistry::load("./config/policy")?;
/// let regime = registry.regime("tcja_baseline")?;
/// let profile = HouseholdProfile::new(Decimal::from(500_000), 2, FilingStatus::Single);
///
/// let impact = compute_policy_impact(&profile, regime)?;
/// assert_eq!(impact.tax_owed, Decimal::new(15068950, 2));
/// # Ok::<(), policy_impact_engine::error::EngineError>(())
/// ```
pub fn compute_policy_impact(
    profile: &HouseholdProfile,
    regime: &PolicyRegime,
) -> EngineResult<PolicyImpactResult> {
    calculate_policy_impact(profile, regime).map(|report| report.impact)
}

/// Computes the impact of a regime on a household with a full audit trace.
pub fn calculate_policy_impact(
    profile: &HouseholdProfile,
    regime: &PolicyRegime,
) -> EngineResult<PolicyImpactReport> {
    let start_time = Instant::now();
    profile.validate()?;

    let tax = calculate_tax_impact(profile.income, profile.filing_status, regime, 1)?;
    let credit = calculate_child_credit(
        profile.income,
        profile.dependents,
        profile.filing_status,
        regime,
        2,
    )?;

    let impact = PolicyImpactResult {
        tax_owed: tax.tax_owed,
        child_credit_amount: credit.credit_amount,
    };

    debug!(
        regime = %regime.id,
        filing_status = %profile.filing_status,
        tax_owed = %impact.tax_owed,
        child_credit = %impact.child_credit_amount,
        "Computed policy impact"
    );

    Ok(PolicyImpactReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        regime_id: regime.id.clone(),
        regime_name: regime.name.clone(),
        impact,
        audit_trace: AuditTrace {
            steps: vec![tax.audit_step, credit.audit_step],
            warnings: credit.warning.into_iter().collect(),
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Evaluates every registered regime against one household.
///
/// Reports follow registry order. Any failure aborts the whole comparison.
pub fn compare_regimes(
    profile: &HouseholdProfile,
    registry: &RegimeRegistry,
) -> EngineResult<PolicyComparison> {
    let reports = registry
        .regimes()
        .iter()
        .map(|regime| calculate_policy_impact(profile, regime))
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(PolicyComparison {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        BracketTable, ChildCreditParameters, HighIncomeSurtax, RegistryMetadata, TaxBracket,
    };
    use crate::error::{EngineError, ErrorKind};
    use crate::models::FilingStatus;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn single_table() -> BracketTable {
        BracketTable::new(vec![
            TaxBracket::bounded(dec("9525"), dec("0.10")),
            TaxBracket::bounded(dec("38700"), dec("0.12")),
            TaxBracket::bounded(dec("82500"), dec("0.22")),
            TaxBracket::bounded(dec("157500"), dec("0.24")),
            TaxBracket::bounded(dec("200000"), dec("0.32")),
            TaxBracket::bounded(dec("500000"), dec("0.35")),
            TaxBracket::unbounded(dec("0.37")),
        ])
        .unwrap()
    }

    fn married_table() -> BracketTable {
        BracketTable::new(vec![
            TaxBracket::bounded(dec("19050"), dec("0.10")),
            TaxBracket::bounded(dec("77400"), dec("0.12")),
            TaxBracket::bounded(dec("165000"), dec("0.22")),
            TaxBracket::bounded(dec("315000"), dec("0.24")),
            TaxBracket::bounded(dec("400000"), dec("0.32")),
            TaxBracket::bounded(dec("600000"), dec("0.35")),
            TaxBracket::unbounded(dec("0.37")),
        ])
        .unwrap()
    }

    fn create_regime(id: &str, surtax_rate: Option<&str>) -> PolicyRegime {
        let mut brackets = HashMap::new();
        brackets.insert(FilingStatus::Single, single_table());
        brackets.insert(FilingStatus::MarriedFilingJointly, married_table());

        let mut phaseout_thresholds = HashMap::new();
        phaseout_thresholds.insert(FilingStatus::Single, dec("200000"));
        phaseout_thresholds.insert(FilingStatus::MarriedFilingJointly, dec("400000"));

        let surtax = surtax_rate.map(|rate| {
            let mut thresholds = HashMap::new();
            thresholds.insert(FilingStatus::Single, dec("400000"));
            thresholds.insert(FilingStatus::MarriedFilingJointly, dec("450000"));
            HighIncomeSurtax {
                rate: dec(rate),
                thresholds,
            }
        });

        PolicyRegime {
            id: id.to_string(),
            name: id.replace('_', " "),
            title: "Test regime".to_string(),
            description: None,
            brackets,
            surtax,
            child_credit: ChildCreditParameters {
                per_dependent: dec("2000"),
                phaseout_rate: dec("0.05"),
                phaseout_thresholds,
            },
        }
    }

    fn create_registry() -> RegimeRegistry {
        RegimeRegistry::new(
            RegistryMetadata {
                name: "Test".to_string(),
                version: "1".to_string(),
                tax_year: 2018,
                source: "unit tests".to_string(),
            },
            vec![
                create_regime("baseline", None),
                create_regime("surtax", Some("0.396")),
            ],
        )
        .unwrap()
    }

    /// PI-001: single filer at 500,000 with two dependents
    #[test]
    fn test_single_500k_two_dependents() {
        let profile = HouseholdProfile::new(dec("500000"), 2, FilingStatus::Single);
        let impact = compute_policy_impact(&profile, &create_regime("baseline", None)).unwrap();

        assert_eq!(impact.tax_owed, dec("150689.50"));
        assert_eq!(impact.child_credit_amount, Decimal::ZERO);
    }

    /// PI-002: married filer with no income keeps the full credit
    #[test]
    fn test_married_zero_income_full_credit() {
        let profile = HouseholdProfile::new(Decimal::ZERO, 3, FilingStatus::MarriedFilingJointly);
        let impact = compute_policy_impact(&profile, &create_regime("baseline", None)).unwrap();

        assert_eq!(impact.tax_owed, Decimal::ZERO);
        assert_eq!(impact.child_credit_amount, dec("6000"));
    }

    /// PI-003: negative dependents return a validation error
    #[test]
    fn test_negative_dependents_validation_error() {
        let profile = HouseholdProfile::new(dec("75000"), -1, FilingStatus::Single);
        let err = compute_policy_impact(&profile, &create_regime("baseline", None)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, EngineError::InvalidProfile { .. }));
    }

    /// PI-004: negative income returns a validation error
    #[test]
    fn test_negative_income_validation_error() {
        let profile = HouseholdProfile::new(dec("-1"), 0, FilingStatus::Single);
        let err = compute_policy_impact(&profile, &create_regime("baseline", None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    /// PI-005: unregistered status returns a configuration error
    #[test]
    fn test_unregistered_status_configuration_error() {
        let profile = HouseholdProfile::new(dec("75000"), 1, FilingStatus::HeadOfHousehold);
        let err = compute_policy_impact(&profile, &create_regime("baseline", None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    /// PI-006: report carries both audit steps in order
    #[test]
    fn test_report_audit_trace() {
        let profile = HouseholdProfile::new(dec("500000"), 2, FilingStatus::Single);
        let report = calculate_policy_impact(&profile, &create_regime("surtax", Some("0.396")))
            .unwrap();

        assert_eq!(report.regime_id, "surtax");
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.audit_trace.steps.len(), 2);
        assert_eq!(report.audit_trace.steps[0].rule_id, "federal_tax");
        assert_eq!(report.audit_trace.steps[0].step_number, 1);
        assert_eq!(report.audit_trace.steps[1].rule_id, "child_tax_credit");
        assert_eq!(report.audit_trace.steps[1].step_number, 2);
        assert_eq!(report.audit_trace.warnings.len(), 1);
    }

    /// PI-007: identical inputs give identical results
    #[test]
    fn test_deterministic() {
        let profile = HouseholdProfile::new(dec("312345.67"), 4, FilingStatus::MarriedFilingJointly);
        let regime = create_regime("surtax", Some("0.396"));

        let first = compute_policy_impact(&profile, &regime).unwrap();
        let second = compute_policy_impact(&profile, &regime).unwrap();
        assert_eq!(first, second);
    }

    /// PI-008: comparison follows registry order
    #[test]
    fn test_compare_regimes_in_registry_order() {
        let profile = HouseholdProfile::new(dec("500000"), 2, FilingStatus::Single);
        let comparison = compare_regimes(&profile, &create_registry()).unwrap();

        let ids: Vec<&str> = comparison
            .reports
            .iter()
            .map(|r| r.regime_id.as_str())
            .collect();
        assert_eq!(ids, vec!["baseline", "surtax"]);
        assert_eq!(
            comparison.report("baseline").unwrap().impact.tax_owed,
            dec("150689.50")
        );
        assert_eq!(
            comparison.report("surtax").unwrap().impact.tax_owed,
            dec("155289.50")
        );
    }

    /// PI-009: comparison returns no partial result on failure
    #[test]
    fn test_compare_regimes_fails_whole() {
        let profile = HouseholdProfile::new(dec("500000"), -2, FilingStatus::Single);
        assert!(compare_regimes(&profile, &create_registry()).is_err());
    }

    /// PI-010: regimes can be evaluated from several threads at once
    #[test]
    fn test_concurrent_evaluation() {
        let registry = Arc::new(create_registry());
        let profile = HouseholdProfile::new(dec("450000"), 1, FilingStatus::MarriedFilingJointly);
        let expected = compare_regimes(&profile, &registry).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let profile = profile.clone();
                std::thread::spawn(move || compare_regimes(&profile, &registry).unwrap())
            })
            .collect();

        for handle in handles {
            let comparison = handle.join().unwrap();
            for (actual, expected) in comparison.reports.iter().zip(&expected.reports) {
                assert_eq!(actual.impact, expected.impact);
            }
        }
    }
}
