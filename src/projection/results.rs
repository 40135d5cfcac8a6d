//! Projection output structures

use serde::{Deserialize, Serialize};

use super::depletion::Depletion;
use super::levers::LeverEffects;

/// Year whose surplus is reported on the summary card
pub const REFERENCE_SURPLUS_YEAR: u32 = 2030;

/// Year whose balance is reported on the summary card (last baseline year)
pub const CHECKPOINT_YEAR: u32 = 2033;

/// Months of cost the assets would cover
///
/// Zero when assets are exhausted or when cost is not positive.
pub fn months_of_reserve(assets: f64, cost: f64) -> f64 {
    if assets > 0.0 && cost > 0.0 {
        assets / cost * 12.0
    } else {
        0.0
    }
}

/// One projected year ($B)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyResult {
    pub year: u32,
    pub income: f64,
    pub cost: f64,
    pub surplus: f64,
    /// End-of-year total assets (treasury + equity sleeves)
    pub assets: f64,
    pub months_reserve: f64,
}

/// Internal breakdown of a projected year, emitted with `detailed_output`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearDetail {
    pub year: u32,
    pub payroll: f64,
    /// Whether income and cost came from the published baseline
    pub within_baseline: bool,
    pub baseline_income: f64,
    pub baseline_cost: f64,
    /// Benefit taxation revenue embedded in baseline income at current-law inclusion
    pub baseline_benefit_tax: f64,
    pub treasury_interest: f64,
    pub levers: LeverEffects,
    pub equity_transfer: f64,
    pub treasury_balance: f64,
    pub equity_balance: f64,
}

/// Reserve adequacy bands used when presenting a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveStatus {
    Depleted,
    /// Less than a year of cost in reserve
    Low,
    Healthy,
}

impl ReserveStatus {
    pub fn classify(months_reserve: f64) -> Self {
        if months_reserve <= 0.0 {
            ReserveStatus::Depleted
        } else if months_reserve < 12.0 {
            ReserveStatus::Low
        } else {
            ReserveStatus::Healthy
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Engine-computed years, ordered by year
    pub yearly: Vec<YearlyResult>,

    /// Per-year breakdown (empty unless detailed output was requested)
    pub details: Vec<YearDetail>,

    pub depletion: Option<Depletion>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self {
            yearly: Vec::new(),
            details: Vec::new(),
            depletion: None,
        }
    }

    pub fn add_row(&mut self, row: YearlyResult) {
        self.yearly.push(row);
    }

    /// Depletion year, whether simulated or extrapolated
    pub fn depletion_year(&self) -> Option<u32> {
        self.depletion.map(|d| d.year())
    }

    pub fn row(&self, year: u32) -> Option<&YearlyResult> {
        let first = self.yearly.first()?.year;
        self.yearly.get(year.checked_sub(first)? as usize)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let first_year = self.yearly.first().map(|r| r.year).unwrap_or(0);
        let last_year = self.yearly.last().map(|r| r.year).unwrap_or(0);
        let final_assets = self.yearly.last().map(|r| r.assets).unwrap_or(0.0);
        let final_months_reserve = self.yearly.last().map(|r| r.months_reserve).unwrap_or(0.0);

        let peak_assets = self.yearly.iter().map(|r| r.assets).fold(0.0, f64::max);
        let min_months_reserve = self
            .yearly
            .iter()
            .map(|r| r.months_reserve)
            .fold(f64::INFINITY, f64::min);
        let deficit_years = self.yearly.iter().filter(|r| r.surplus < 0.0).count() as u32;

        let depletion_year = self.depletion_year();
        let checkpoint = self.row(CHECKPOINT_YEAR);

        ProjectionSummary {
            total_years: self.yearly.len() as u32,
            first_year,
            last_year,
            final_assets,
            final_months_reserve,
            peak_assets,
            min_months_reserve: if self.yearly.is_empty() { 0.0 } else { min_months_reserve },
            deficit_years,
            reference_surplus: self.row(REFERENCE_SURPLUS_YEAR).map(|r| r.surplus),
            checkpoint_assets: checkpoint.map(|r| r.assets),
            checkpoint_months_reserve: checkpoint.map(|r| r.months_reserve),
            depletion_year,
            depletion_extrapolated: self.depletion.map(|d| d.is_extrapolated()).unwrap_or(false),
            years_to_depletion: depletion_year.map(|year| year.saturating_sub(first_year)),
        }
    }
}

impl Default for ProjectionResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub first_year: u32,
    pub last_year: u32,
    pub final_assets: f64,
    pub final_months_reserve: f64,
    pub peak_assets: f64,
    pub min_months_reserve: f64,
    pub deficit_years: u32,
    /// Surplus in [`REFERENCE_SURPLUS_YEAR`], if projected
    pub reference_surplus: Option<f64>,
    /// Assets in [`CHECKPOINT_YEAR`], if projected
    pub checkpoint_assets: Option<f64>,
    pub checkpoint_months_reserve: Option<f64>,
    pub depletion_year: Option<u32>,
    pub depletion_extrapolated: bool,
    pub years_to_depletion: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: u32, income: f64, cost: f64, assets: f64) -> YearlyResult {
        YearlyResult {
            year,
            income,
            cost,
            surplus: income - cost,
            assets,
            months_reserve: months_of_reserve(assets, cost),
        }
    }

    #[test]
    fn test_months_of_reserve_guards() {
        assert_eq!(months_of_reserve(100.0, 1200.0), 1.0);
        assert_eq!(months_of_reserve(0.0, 1200.0), 0.0);
        assert_eq!(months_of_reserve(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_reserve_status() {
        assert_eq!(ReserveStatus::classify(0.0), ReserveStatus::Depleted);
        assert_eq!(ReserveStatus::classify(6.5), ReserveStatus::Low);
        assert_eq!(ReserveStatus::classify(12.0), ReserveStatus::Healthy);
    }

    #[test]
    fn test_row_lookup_and_summary() {
        let mut result = ProjectionResult::new();
        result.add_row(row(2024, 100.0, 120.0, 40.0));
        result.add_row(row(2025, 100.0, 130.0, 10.0));
        result.add_row(row(2026, 100.0, 140.0, 0.0));
        result.depletion = Some(Depletion::Simulated(2026));

        assert_eq!(result.row(2025).map(|r| r.assets), Some(10.0));
        assert!(result.row(2023).is_none());
        assert!(result.row(2027).is_none());

        let summary = result.summary();
        assert_eq!(summary.total_years, 3);
        assert_eq!(summary.deficit_years, 3);
        assert_eq!(summary.peak_assets, 40.0);
        assert_eq!(summary.min_months_reserve, 0.0);
        assert_eq!(summary.depletion_year, Some(2026));
        assert_eq!(summary.years_to_depletion, Some(2));
        assert!(!summary.depletion_extrapolated);
        assert_eq!(summary.reference_surplus, None);
        assert_eq!(summary.checkpoint_assets, None);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ProjectionResult::new().summary();
        assert_eq!(summary.total_years, 0);
        assert_eq!(summary.min_months_reserve, 0.0);
        assert_eq!(summary.depletion_year, None);
        assert_eq!(summary.reference_surplus, None);
    }

    #[test]
    fn test_summary_cards() {
        let mut result = ProjectionResult::new();
        for (i, year) in (2028..=2034).enumerate() {
            result.add_row(row(year, 1000.0, 1100.0, 600.0 - 100.0 * i as f64));
        }

        let summary = result.summary();
        assert_eq!(summary.reference_surplus, Some(-100.0));
        assert_eq!(summary.checkpoint_assets, Some(100.0));
        assert_eq!(summary.checkpoint_months_reserve, Some(months_of_reserve(100.0, 1100.0)));
    }
}
