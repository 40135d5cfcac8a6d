//! Depletion year resolution and approximate extension past the horizon

use serde::{Deserialize, Serialize};

use super::engine::MAX_END_YEAR;
use super::results::{months_of_reserve, ProjectionResult, YearlyResult};
use crate::baseline::ReturnRates;

/// Year trust fund assets reach zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depletion {
    /// A projected year ended with zero assets
    Simulated(u32),
    /// Assets were still positive but falling when the horizon ended;
    /// the year is estimated from the final deficit
    Extrapolated(u32),
}

impl Depletion {
    pub fn year(&self) -> u32 {
        match self {
            Depletion::Simulated(year) | Depletion::Extrapolated(year) => *year,
        }
    }

    pub fn is_extrapolated(&self) -> bool {
        matches!(self, Depletion::Extrapolated(_))
    }
}

/// Settle the depletion year for a finished projection
///
/// `simulated` is the first zero-asset year seen by the engine. Without
/// one, a positive balance with a deficit in the final year is run down at
/// that deficit: `last_year + ceil(assets / |surplus|)`. A run-down that
/// would end after [`MAX_END_YEAR`] reports no depletion year.
pub fn resolve_depletion(simulated: Option<u32>, rows: &[YearlyResult]) -> Option<Depletion> {
    if let Some(year) = simulated {
        return Some(Depletion::Simulated(year));
    }

    let last = rows.last()?;
    if last.surplus < 0.0 && last.assets > 0.0 {
        let years_left = (last.assets / -last.surplus).ceil();
        if last.year as f64 + years_left > MAX_END_YEAR as f64 {
            log::warn!(
                "assets of {:.1} at {} with a {:.1} deficit last past {}; no depletion year reported",
                last.assets,
                last.year,
                last.surplus,
                MAX_END_YEAR
            );
            return None;
        }

        let years_left = years_left as u32;
        log::warn!(
            "assets of {:.1} remain at {} with a {:.1} deficit; extrapolating depletion {} years out",
            last.assets,
            last.year,
            last.surplus,
            years_left
        );
        return last.year.checked_add(years_left).map(Depletion::Extrapolated);
    }

    None
}

/// Year projected beyond the engine horizon with fixed growth rates
///
/// Lower fidelity than engine rows: no lever phase-in, no payroll scaling
/// and no investment return. Kept as a separate type so it can never be
/// mistaken for a [`YearlyResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproximateRow {
    pub year: u32,
    pub income: f64,
    pub cost: f64,
    pub surplus: f64,
    pub assets: f64,
    pub months_reserve: f64,
    /// Always true; lets serialized consumers tell these rows apart
    pub approximate: bool,
}

/// Project rows after the last engine year through `through_year`
///
/// Income and cost grow at the extension rates from the final engine row;
/// assets roll forward by surplus and are floored at zero. Rows stop at
/// [`MAX_END_YEAR`].
pub fn extend(result: &ProjectionResult, through_year: u32, rates: &ReturnRates) -> Vec<ApproximateRow> {
    let Some(last) = result.yearly.last() else {
        return Vec::new();
    };
    let through_year = through_year.min(MAX_END_YEAR);

    let mut income = last.income;
    let mut cost = last.cost;
    let mut assets = last.assets;

    ((last.year + 1)..=through_year)
        .map(|year| {
            income *= 1.0 + rates.extension_income_growth;
            cost *= 1.0 + rates.extension_cost_growth;
            let surplus = income - cost;
            assets = (assets + surplus).max(0.0);

            ApproximateRow {
                year,
                income,
                cost,
                surplus,
                assets,
                months_reserve: months_of_reserve(assets, cost),
                approximate: true,
            }
        })
        .collect()
}
