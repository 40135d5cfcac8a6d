//! Core projection engine for yearly trust fund projections

use crate::baseline::Baseline;
use crate::error::{Result, SolvencyError};
use crate::policy::PolicyInputs;
use super::depletion::resolve_depletion;
use super::levers::{benefit_tax_amount, LeverEffects};
use super::phase_in::phase_in_fraction;
use super::results::{months_of_reserve, ProjectionResult, YearDetail, YearlyResult};
use super::state::ProjectionState;

/// End of the 75-year valuation window starting in 2024
pub const DEFAULT_END_YEAR: u32 = 2098;

/// Latest year a projection or an approximate extension may reach
pub const MAX_END_YEAR: u32 = 2200;

/// Reject a horizon year later than [`MAX_END_YEAR`]
pub fn check_horizon_year(field: &'static str, year: u32) -> Result<()> {
    if year > MAX_END_YEAR {
        return Err(SolvencyError::InvalidInput {
            field,
            reason: format!("must not be later than {}, got {}", MAX_END_YEAR, year),
        });
    }
    Ok(())
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Last year to project; never earlier than the last baseline year
    pub end_year: u32,

    /// Whether to record per-year breakdowns alongside the results
    pub detailed_output: bool,
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<()> {
        check_horizon_year("end_year", self.end_year)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            end_year: DEFAULT_END_YEAR,
            detailed_output: false,
        }
    }
}

/// Main projection engine
///
/// A pure function of baseline, configuration and policy inputs: no I/O,
/// no shared state, identical inputs give bit-identical output.
pub struct ProjectionEngine {
    baseline: Baseline,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given baseline and config
    pub fn new(baseline: Baseline, config: ProjectionConfig) -> Self {
        Self { baseline, config }
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Last projected year
    ///
    /// `end_year` is clamped to [`MAX_END_YEAR`] but never cuts the
    /// baseline years short.
    pub fn horizon_end(&self) -> u32 {
        self.config
            .end_year
            .min(MAX_END_YEAR)
            .max(self.baseline.series.last_year())
    }

    /// Run the projection for one set of policy inputs
    ///
    /// Every year through the horizon end is emitted, including years spent
    /// at zero assets. A depleted fund can recover when later surpluses turn
    /// positive; the depletion year remains the first zero-asset year.
    ///
    /// Deficits draw only on the treasury sleeve. Once treasury is exhausted
    /// any remaining deficit goes unfunded while the equity sleeve keeps
    /// compounding, so a plan with any equity shift never records a
    /// zero-asset year. Its depletion is then extrapolated from the final
    /// row instead.
    pub fn project(&self, inputs: &PolicyInputs) -> ProjectionResult {
        let mut result = ProjectionResult::new();
        let mut state = ProjectionState::opening(&self.baseline);

        while state.year <= self.horizon_end() {
            let (row, detail) = self.project_year(inputs, &mut state);
            result.add_row(row);
            if self.config.detailed_output {
                result.details.push(detail);
            }

            if state.check_depletion() {
                log::debug!("trust fund depleted in {}", state.year);
            }

            state.advance_year();
        }

        result.depletion = resolve_depletion(state.depletion_year, &result.yearly);
        result
    }

    /// Calculate one year and update the sleeves in `state`
    fn project_year(&self, inputs: &PolicyInputs, state: &mut ProjectionState) -> (YearlyResult, YearDetail) {
        let year = state.year;
        let series = &self.baseline.series;
        let rates = &self.baseline.rates;
        let payroll = series.payroll().payroll(year);

        // Published figures inside the baseline horizon, payroll ratios after
        let (baseline_income, baseline_cost, within_baseline) = match series.rows().get(state.baseline_index) {
            Some(row) => (row.income, row.cost, true),
            None => {
                let (income_ratio, cost_ratio) = series.terminal_ratios();
                (income_ratio * payroll, cost_ratio * payroll, false)
            }
        };

        // Equity shift follows its own phase-in; moved before interest accrues
        let equity_target = inputs.equity_shift_b
            * phase_in_fraction(year, self.baseline.start_year(), inputs.implementation.equity_shift);
        let equity_transfer = state.transfer_to_equity(equity_target);

        // Baseline income already includes interest inside the horizon
        let treasury_interest = if within_baseline {
            0.0
        } else {
            state.treasury * rates.treasury_interest
        };

        let levers = LeverEffects::for_year(&self.baseline, inputs, year, payroll);

        let income = baseline_income + treasury_interest + levers.income_total();
        let cost = baseline_cost - levers.cost_reduction_total();
        let surplus = income - cost;

        state.compound_equity(rates.equity_return);
        state.apply_surplus(surplus);

        let assets = state.total_assets();
        let row = YearlyResult {
            year,
            income,
            cost,
            surplus,
            assets,
            months_reserve: months_of_reserve(assets, cost),
        };

        let tax = &self.baseline.benefit_taxation;
        let detail = YearDetail {
            year,
            payroll,
            within_baseline,
            baseline_income,
            baseline_cost,
            baseline_benefit_tax: benefit_tax_amount(tax, tax.baseline_middle_pct, tax.baseline_upper_pct, payroll),
            treasury_interest,
            levers,
            equity_transfer,
            treasury_balance: state.treasury,
            equity_balance: state.equity,
        };

        (row, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CapOption;
    use crate::projection::Depletion;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(Baseline::ssa_2024_intermediate(), ProjectionConfig::default())
    }

    fn detailed_engine() -> ProjectionEngine {
        let config = ProjectionConfig {
            detailed_output: true,
            ..Default::default()
        };
        ProjectionEngine::new(Baseline::ssa_2024_intermediate(), config)
    }

    #[test]
    fn test_status_quo_reproduces_baseline() {
        let engine = engine();
        let result = engine.project(&PolicyInputs::status_quo());

        for (row, base) in result.yearly.iter().zip(engine.baseline().series.rows()) {
            assert_eq!(row.year, base.year);
            assert_abs_diff_eq!(row.income, base.income, epsilon = 1e-9);
            assert_abs_diff_eq!(row.cost, base.cost, epsilon = 1e-9);
            assert_abs_diff_eq!(row.assets, base.assets, epsilon = 1e-9);
        }
        assert_eq!(result.depletion, Some(Depletion::Simulated(2033)));
    }

    #[test]
    fn test_runs_through_horizon() {
        let result = engine().project(&PolicyInputs::status_quo());
        assert_eq!(result.yearly.first().map(|r| r.year), Some(2024));
        assert_eq!(result.yearly.last().map(|r| r.year), Some(DEFAULT_END_YEAR));
        assert_eq!(result.yearly.len(), (DEFAULT_END_YEAR - 2024 + 1) as usize);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_horizon_never_shorter_than_baseline() {
        let config = ProjectionConfig {
            end_year: 2026,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(Baseline::ssa_2024_intermediate(), config);
        assert_eq!(engine.horizon_end(), 2033);
        assert_eq!(engine.project(&PolicyInputs::status_quo()).yearly.len(), 10);
    }

    #[test]
    fn test_end_year_clamped_to_maximum() {
        let config = ProjectionConfig {
            end_year: 20_000_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SolvencyError::InvalidInput { field: "end_year", .. })));

        let engine = ProjectionEngine::new(Baseline::ssa_2024_intermediate(), config);
        assert_eq!(engine.horizon_end(), MAX_END_YEAR);
        let result = engine.project(&PolicyInputs::status_quo());
        assert_eq!(result.yearly.last().map(|r| r.year), Some(MAX_END_YEAR));

        assert!(ProjectionConfig::default().validate().is_ok());
        assert!(check_horizon_year("end_year", MAX_END_YEAR).is_ok());
    }

    #[test]
    fn test_status_quo_stays_depleted() {
        let result = engine().project(&PolicyInputs::status_quo());
        let depleted = result.row(2033).unwrap();
        assert_eq!(depleted.assets, 0.0);
        assert_eq!(depleted.months_reserve, 0.0);
        assert!(result.yearly.iter().filter(|r| r.year >= 2033).all(|r| r.assets == 0.0));
    }

    #[test]
    fn test_payroll_ratios_past_horizon() {
        let engine = detailed_engine();
        let result = engine.project(&PolicyInputs::status_quo());
        let (income_ratio, cost_ratio) = engine.baseline().series.terminal_ratios();

        let detail = result.details.iter().find(|d| d.year == 2040).unwrap();
        assert!(!detail.within_baseline);
        assert_abs_diff_eq!(detail.baseline_income, income_ratio * detail.payroll, epsilon = 1e-9);
        assert_abs_diff_eq!(detail.baseline_cost, cost_ratio * detail.payroll, epsilon = 1e-9);
        // Depleted fund earns no interest
        assert_eq!(detail.treasury_interest, 0.0);
    }

    #[test]
    fn test_wage_cap_first_year_income() {
        let engine = engine();
        let mut inputs = PolicyInputs::status_quo();
        inputs.cap_option = CapOption::Plus100;
        inputs.implementation.wage_cap = Some(2024);

        let base = engine.project(&PolicyInputs::status_quo());
        let reform = engine.project(&inputs);

        // 11 ppt / 5 * 0.0038 * 9700
        assert_abs_diff_eq!(reform.yearly[0].income - base.yearly[0].income, 81.092, epsilon = 1e-9);
        for (r, b) in reform.yearly.iter().zip(&base.yearly) {
            assert_eq!(r.cost, b.cost);
        }
    }

    #[test]
    fn test_retirement_age_phase_in() {
        let engine = engine();
        let mut inputs = PolicyInputs::status_quo();
        inputs.retirement_age_delay = 2.0;
        inputs.implementation.retirement_age = Some(2028);

        let base = engine.project(&PolicyInputs::status_quo());
        let reform = engine.project(&inputs);
        let payroll = engine.baseline().series.payroll();

        for (r, b) in reform.yearly.iter().zip(&base.yearly).take(12) {
            let full = 2.0 * 0.0030 * payroll.payroll(r.year);
            let fraction = if r.year >= 2028 { 1.0 } else { (r.year - 2024) as f64 / 4.0 };
            assert_abs_diff_eq!(b.cost - r.cost, full * fraction, epsilon = 1e-9);
            if r.year <= 2033 {
                assert_eq!(r.income, b.income, "income changed in {}", r.year);
            }
        }
        assert_eq!(reform.yearly[0].cost, base.yearly[0].cost);
    }

    #[test]
    fn test_interest_credited_past_horizon() {
        let engine = detailed_engine();
        let mut inputs = PolicyInputs::status_quo();
        inputs.general_revenue_b = 600.0;

        let result = engine.project(&inputs);
        let inside = result.details.iter().find(|d| d.year == 2033).unwrap();
        assert_eq!(inside.treasury_interest, 0.0);
        assert!(inside.treasury_balance > 0.0);

        let after = result.details.iter().find(|d| d.year == 2034).unwrap();
        assert_abs_diff_eq!(after.treasury_interest, inside.treasury_balance * 0.046, epsilon = 1e-9);
    }

    #[test]
    fn test_equity_sleeve_compounds() {
        let engine = detailed_engine();
        let mut inputs = PolicyInputs::status_quo();
        inputs.equity_shift_b = 500.0;

        let result = engine.project(&inputs);
        let base = engine.project(&PolicyInputs::status_quo());

        let first = &result.details[0];
        assert_eq!(first.equity_transfer, 500.0);
        assert_abs_diff_eq!(first.equity_balance, 500.0 * 1.065, epsilon = 1e-9);
        assert_abs_diff_eq!(result.details[1].equity_balance, 500.0 * 1.065 * 1.065, epsilon = 1e-9);
        assert_eq!(result.details[1].equity_transfer, 0.0);

        // Income and cost are untouched; the return shows up in assets only
        assert_eq!(result.yearly[0].income, base.yearly[0].income);
        assert_abs_diff_eq!(result.yearly[0].assets - base.yearly[0].assets, 500.0 * 0.065, epsilon = 1e-9);
    }

    #[test]
    fn test_equity_sleeve_not_drawn_for_deficits() {
        let engine = detailed_engine();
        let mut inputs = PolicyInputs::status_quo();
        inputs.equity_shift_b = 1.0;

        let result = engine.project(&inputs);
        for detail in result.details.iter().filter(|d| d.year >= 2033) {
            assert_eq!(detail.treasury_balance, 0.0, "treasury left in {}", detail.year);
            assert!(detail.equity_balance > 0.0);
        }
        for row in result.yearly.iter().filter(|r| r.year >= 2033) {
            assert!(row.surplus < 0.0 && row.assets > 0.0);
        }

        // No zero-asset year, so depletion is extrapolated from the last deficit
        assert_eq!(result.depletion, Some(Depletion::Extrapolated(DEFAULT_END_YEAR + 1)));
    }

    #[test]
    fn test_phased_equity_shift() {
        let engine = detailed_engine();
        let mut inputs = PolicyInputs::status_quo();
        inputs.equity_shift_b = 400.0;
        inputs.implementation.equity_shift = Some(2028);

        let result = engine.project(&inputs);
        let transfers: Vec<f64> = result.details.iter().take(6).map(|d| d.equity_transfer).collect();
        for (got, want) in transfers.iter().zip([0.0, 100.0, 100.0, 100.0, 100.0, 0.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_depleted_fund_can_recover() {
        let engine = engine();
        let mut inputs = PolicyInputs::status_quo();
        // 4 ppt reaches full effect only in 2060, after the reserve runs out
        inputs.combined_rate_step = 4.0;
        inputs.implementation.combined_rate = Some(2060);

        let result = engine.project(&inputs);
        let depletion = result.depletion.expect("fund should deplete before the rate increase ramps up");
        assert!(!depletion.is_extrapolated());

        let year = depletion.year();
        assert_eq!(result.row(year).unwrap().assets, 0.0);
        assert!(result.yearly.iter().any(|r| r.year > year && r.assets > 0.0));
        // Depletion year is the first zero, not reset by the recovery
        assert!(result.yearly.iter().filter(|r| r.year < year).all(|r| r.assets > 0.0));
    }

    #[test]
    fn test_extrapolated_depletion() {
        let config = ProjectionConfig {
            end_year: 2033,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(Baseline::ssa_2024_intermediate(), config);
        let mut inputs = PolicyInputs::status_quo();
        inputs.general_revenue_b = 100.0;

        let result = engine.project(&inputs);
        let last = result.yearly.last().unwrap();
        assert!(last.assets > 0.0 && last.surplus < 0.0);

        let expected = 2033 + (last.assets / -last.surplus).ceil() as u32;
        assert_eq!(result.depletion, Some(Depletion::Extrapolated(expected)));
    }

    #[test]
    fn test_sample_reform_extends_solvency() {
        let engine = engine();
        let base = engine.project(&PolicyInputs::status_quo());
        let reform = engine.project(&PolicyInputs::sample_reform());
        let base_year = base.depletion_year().unwrap();
        assert!(reform.depletion_year().map_or(true, |year| year > base_year));
    }

    #[test]
    fn test_preset_roundtrip_gives_identical_trajectory() {
        let engine = engine();
        let inputs = PolicyInputs::sample_reform();
        let json = serde_json::to_string(&inputs).unwrap();
        let reloaded: PolicyInputs = serde_json::from_str(&json).unwrap();

        assert_eq!(engine.project(&inputs), engine.project(&reloaded));
    }

    fn arbitrary_inputs() -> impl Strategy<Value = PolicyInputs> {
        (
            (0u32..=20, 0u32..=20, 0u32..=20, 0u32..=10),
            (0usize..6, 0u32..=40, 0u32..=5, any::<bool>(), 0u32..=5),
            (0u32..=12, 0u32..=10, 0u32..=3000, 0u32..=100, 0u32..=100),
            (2024u32..2070, 2024u32..2070, 2024u32..2070),
        )
            .prop_map(|(rates, levers, other, years)| {
                let (combined, employee, employer, surtax) = rates;
                let (cap, custom, fra, chained, ppi) = levers;
                let (immig, equity, genrev, middle, upper) = other;
                let (y1, y2, y3) = years;

                let cap_option = match cap {
                    0 => CapOption::StatusQuo,
                    1 => CapOption::Plus50,
                    2 => CapOption::Plus75,
                    3 => CapOption::Plus100,
                    4 => CapOption::NoCap,
                    _ => CapOption::Custom(custom as f64),
                };

                let mut inputs = PolicyInputs {
                    combined_rate_step: combined as f64 / 10.0,
                    employee_rate_step: employee as f64 / 10.0,
                    employer_rate_step: employer as f64 / 10.0,
                    employer_surtax: surtax as f64 / 10.0,
                    cap_option,
                    retirement_age_delay: fra as f64,
                    chained_cpi: chained,
                    price_indexing_pct: ppi as f64 * 10.0,
                    immigration_boost_m: immig as f64 * 0.25,
                    equity_shift_b: equity as f64 * 100.0,
                    general_revenue_b: genrev as f64,
                    middle_inclusion_pct: middle as f64,
                    upper_inclusion_pct: upper as f64,
                    ..PolicyInputs::status_quo()
                };
                inputs.implementation.combined_rate = Some(y1);
                inputs.implementation.wage_cap = Some(y2);
                inputs.implementation.retirement_age = Some(y3);
                inputs.implementation.equity_shift = Some(y1);
                inputs.implementation.general_revenue = Some(y2);
                inputs
            })
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_assets_never_negative(inputs in arbitrary_inputs()) {
            let result = engine().project(&inputs);
            for row in &result.yearly {
                prop_assert!(row.assets >= 0.0, "negative assets in {}", row.year);
                prop_assert!(row.months_reserve >= 0.0);
                if row.assets == 0.0 {
                    prop_assert_eq!(row.months_reserve, 0.0);
                } else if row.cost > 0.0 {
                    prop_assert_eq!(row.months_reserve, row.assets / row.cost * 12.0);
                }
                prop_assert_eq!(row.surplus, row.income - row.cost);
            }
        }

        #[test]
        fn prop_depletion_year_has_zero_assets(inputs in arbitrary_inputs()) {
            let result = engine().project(&inputs);
            if let Some(Depletion::Simulated(year)) = result.depletion {
                prop_assert_eq!(result.row(year).unwrap().assets, 0.0);
                prop_assert!(result.yearly.iter().filter(|r| r.year < year).all(|r| r.assets > 0.0));
            } else {
                prop_assert!(result.yearly.iter().all(|r| r.assets > 0.0));
            }
        }

        #[test]
        fn prop_projection_is_deterministic(inputs in arbitrary_inputs()) {
            let engine = engine();
            prop_assert_eq!(engine.project(&inputs), engine.project(&inputs));
        }
    }
}
