//! Progressive bracket taxation.
//!
//! This module walks a [`BracketTable`] in ascending order and taxes each
//! dollar of income once, at the marginal rate of the bracket it falls in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BracketTable;

/// The portion of income that fell into one bracket.
///
/// # Example
///
/// ```
/// use policy_impact_engine::calculation::BracketSlice;
/// use rust_decimal::Decimal;
///
/// let slice = BracketSlice {
///     lower_bound: Decimal::ZERO,
///     upper_bound: Some(Decimal::from(9525)),
///     rate: Decimal::new(10, 2),
///     taxable_amount: Decimal::from(9525),
///     tax: Decimal::new(95250, 2),
/// };
/// assert_eq!(slice.taxable_amount * slice.rate, slice.tax);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Where the bracket starts (the previous bracket's upper bound).
    pub lower_bound: Decimal,
    /// Where the bracket ends, or `None` for the unbounded top bracket.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Income taxed inside this bracket.
    pub taxable_amount: Decimal,
    /// `taxable_amount * rate`.
    pub tax: Decimal,
}

/// Splits `income` into per-bracket slices.
///
/// The slice for each bracket is `min(income, upper_bound) - lower_bound`,
/// clamped at zero, and the walk stops at the first bracket whose upper bound
/// reaches the income. Income at or below zero yields no slices.
///
/// # Examples
///
/// ```
/// use policy_impact_engine::calculation::progressive_slices;
/// use policy_impact_engine::config::{BracketTable, TaxBracket};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     TaxBracket::bounded(Decimal::from(10_000), Decimal::new(10, 2)),
///     TaxBracket::unbounded(Decimal::new(20, 2)),
/// ])
/// .unwrap();
///
/// let slices = progressive_slices(Decimal::from(15_000), &table);
/// assert_eq!(slices.len(), 2);
/// assert_eq!(slices[1].taxable_amount, Decimal::from(5_000));
/// ```
pub fn progressive_slices(income: Decimal, table: &BracketTable) -> Vec<BracketSlice> {
    let mut slices = Vec::new();
    if income <= Decimal::ZERO {
        return slices;
    }

    let mut lower_bound = Decimal::ZERO;
    for bracket in table.brackets() {
        let ceiling = bracket.upper_bound.map_or(income, |ub| income.min(ub));
        let taxable_amount = (ceiling - lower_bound).max(Decimal::ZERO);

        slices.push(BracketSlice {
            lower_bound,
            upper_bound: bracket.upper_bound,
            rate: bracket.rate,
            taxable_amount,
            tax: taxable_amount * bracket.rate,
        });

        match bracket.upper_bound {
            Some(upper_bound) if income > upper_bound => lower_bound = upper_bound,
            _ => break,
        }
    }

    slices
}

/// Computes progressive tax on `income` under `table`.
///
/// Equal to the sum of [`progressive_slices`] taxes.
pub fn progressive_tax(income: Decimal, table: &BracketTable) -> Decimal {
    progressive_slices(income, table)
        .iter()
        .map(|slice| slice.tax)
        .sum()
}
