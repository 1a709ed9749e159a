//! Configuration types for policy regimes.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML regime files: bracket tables, the optional
//! high-income surtax, and child tax credit parameters.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::FilingStatus;

/// Metadata describing a set of registered regimes.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryMetadata {
    /// Human-readable name of the regime set.
    pub name: String,
    /// Version of the configuration data.
    pub version: String,
    /// The tax year the tables describe.
    pub tax_year: i32,
    /// Where the figures were taken from.
    pub source: String,
}

/// A single bracket in a progressive table.
///
/// `upper_bound` is `None` for the top bracket, which has no ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, or `None` if unbounded.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied to income inside the bracket.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bracket with a finite ceiling.
    pub fn bounded(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the unbounded top bracket.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// An ordered progressive bracket table.
///
/// Construction enforces the table invariants:
/// - at least one bracket,
/// - every rate lies in `[0, 1]`,
/// - finite upper bounds are positive and strictly increasing,
/// - exactly the last bracket is unbounded.
///
/// # Example
///
/// ```
/// use policy_impact_engine::config::{BracketTable, TaxBracket};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     TaxBracket::bounded(Decimal::from(10_000), Decimal::new(10, 2)),
///     TaxBracket::unbounded(Decimal::new(20, 2)),
/// ])
/// .unwrap();
/// assert_eq!(table.brackets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table, rejecting any bracket list that breaks the invariants.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidBracketTable { message };

        let Some((last, rest)) = brackets.split_last() else {
            return Err(invalid("table has no brackets".to_string()));
        };

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} has rate {} outside [0, 1]",
                    index, bracket.rate
                )));
            }
        }

        let mut previous = Decimal::ZERO;
        for (index, bracket) in rest.iter().enumerate() {
            let Some(upper_bound) = bracket.upper_bound else {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the last bracket",
                    index
                )));
            };
            if upper_bound <= previous {
                return Err(invalid(format!(
                    "bracket {} upper bound {} does not exceed {}",
                    index, upper_bound, previous
                )));
            }
            previous = upper_bound;
        }

        if last.upper_bound.is_some() {
            return Err(invalid("last bracket must be unbounded".to_string()));
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the rate of the unbounded top bracket.
    pub fn top_rate(&self) -> Decimal {
        // The constructor guarantees a non-empty table.
        self.brackets.last().map_or(Decimal::ZERO, |b| b.rate)
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = EngineError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        BracketTable::new(brackets)
    }
}

/// A high-income override: income above a per-status threshold is taxed at
/// a flat surtax rate instead of the progressive table.
#[derive(Debug, Clone, Deserialize)]
pub struct HighIncomeSurtax {
    /// Marginal rate applied to income above the threshold.
    pub rate: Decimal,
    /// Threshold per filing status.
    pub thresholds: HashMap<FilingStatus, Decimal>,
}

/// Child tax credit parameters for a regime.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildCreditParameters {
    /// Flat credit amount per qualifying dependent.
    pub per_dependent: Decimal,
    /// Credit reduction per dollar of income above the threshold.
    pub phaseout_rate: Decimal,
    /// Phaseout threshold per filing status.
    pub phaseout_thresholds: HashMap<FilingStatus, Decimal>,
}

/// A named policy regime.
///
/// Bundles the bracket tables, optional surtax and child credit parameters
/// that together describe one policy proposal.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRegime {
    /// Stable identifier (e.g. "tcja_baseline").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short subtitle shown next to the name.
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Bracket table per filing status.
    pub brackets: HashMap<FilingStatus, BracketTable>,
    /// Optional high-income override.
    #[serde(default)]
    pub surtax: Option<HighIncomeSurtax>,
    /// Child tax credit parameters.
    pub child_credit: ChildCreditParameters,
}

impl PolicyRegime {
    /// Returns the bracket table for a filing status.
    pub fn bracket_table(&self, filing_status: FilingStatus) -> EngineResult<&BracketTable> {
        self.brackets
            .get(&filing_status)
            .ok_or_else(|| EngineError::BracketTableNotFound {
                regime: self.id.clone(),
                filing_status,
            })
    }

    /// Returns the surtax `(threshold, rate)` for a filing status, or `None`
    /// when the regime has no surtax.
    pub fn surtax_for(&self, filing_status: FilingStatus) -> EngineResult<Option<(Decimal, Decimal)>> {
        let Some(surtax) = &self.surtax else {
            return Ok(None);
        };
        surtax
            .thresholds
            .get(&filing_status)
            .map(|threshold| Some((*threshold, surtax.rate)))
            .ok_or_else(|| EngineError::SurtaxThresholdNotFound {
                regime: self.id.clone(),
                filing_status,
            })
    }

    /// Returns the child credit phaseout threshold for a filing status.
    pub fn phaseout_threshold(&self, filing_status: FilingStatus) -> EngineResult<Decimal> {
        self.child_credit
            .phaseout_thresholds
            .get(&filing_status)
            .copied()
            .ok_or_else(|| EngineError::PhaseoutThresholdNotFound {
                regime: self.id.clone(),
                filing_status,
            })
    }

    /// Returns the filing statuses this regime has bracket tables for, sorted.
    pub fn filing_statuses(&self) -> Vec<FilingStatus> {
        let mut statuses: Vec<FilingStatus> = self.brackets.keys().copied().collect();
        statuses.sort();
        statuses
    }

    /// Checks cross-field consistency of the regime.
    ///
    /// Every filing status with a bracket table must also have a phaseout
    /// threshold and, if a surtax is declared, a surtax threshold.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRegime {
            regime: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if self.brackets.is_empty() {
            return Err(invalid("no bracket tables registered".to_string()));
        }

        let credit = &self.child_credit;
        if credit.per_dependent < Decimal::ZERO {
            return Err(invalid(format!(
                "child credit per dependent {} is negative",
                credit.per_dependent
            )));
        }
        if credit.phaseout_rate < Decimal::ZERO {
            return Err(invalid(format!(
                "child credit phaseout rate {} is negative",
                credit.phaseout_rate
            )));
        }
        if let Some(surtax) = &self.surtax {
            if surtax.rate < Decimal::ZERO || surtax.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "surtax rate {} outside [0, 1]",
                    surtax.rate
                )));
            }
        }

        for status in self.filing_statuses() {
            let threshold = self.phaseout_threshold(status).map_err(|_| {
                invalid(format!("no child credit phaseout threshold for {}", status))
            })?;
            if threshold < Decimal::ZERO {
                return Err(invalid(format!(
                    "phaseout threshold for {} is negative",
                    status
                )));
            }
            if let Some((threshold, _)) = self
                .surtax_for(status)
                .map_err(|_| invalid(format!("no surtax threshold for {}", status)))?
            {
                if threshold <= Decimal::ZERO {
                    return Err(invalid(format!(
                        "surtax threshold for {} must be positive",
                        status
                    )));
                }
            }
        }

        Ok(())
    }
}
