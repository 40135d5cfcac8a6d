//! Translation of policy lever settings into dollar effects
//!
//! Coefficients are shares of payroll per calibration unit, so every
//! payroll-scaled effect is `(magnitude / unit) * coefficient * payroll`.

use serde::{Deserialize, Serialize};

use super::phase_in::phase_in_fraction;
use crate::baseline::{units, Baseline, BenefitTaxation};
use crate::policy::{CapOption, PolicyInputs};

/// Calibrated covered-wage gain (percentage points) for a cap option
pub fn wage_gain_pct(option: CapOption) -> f64 {
    match option {
        CapOption::StatusQuo => 0.0,
        CapOption::Plus50 => 7.0,
        CapOption::Plus75 => 9.0,
        CapOption::Plus100 => 11.0,
        CapOption::NoCap => 17.0,
        CapOption::Custom(pct) => pct,
    }
}

/// Benefit taxation revenue at the given inclusion percentages ($B)
pub fn benefit_tax_amount(tax: &BenefitTaxation, middle_pct: f64, upper_pct: f64, payroll: f64) -> f64 {
    tax.marginal_rate * (middle_pct / 100.0 * tax.middle_share + upper_pct / 100.0 * tax.upper_share) * payroll
}

/// Change in benefit taxation revenue relative to current-law inclusion ($B)
pub fn benefit_tax_delta(tax: &BenefitTaxation, middle_pct: f64, upper_pct: f64, payroll: f64) -> f64 {
    let middle = (middle_pct - tax.baseline_middle_pct) / 100.0 * tax.middle_share;
    let upper = (upper_pct - tax.baseline_upper_pct) / 100.0 * tax.upper_share;
    tax.marginal_rate * (middle + upper) * payroll
}

/// Phased lever effects for one projection year ($B)
///
/// Income-side fields add to income; cost-side fields are reductions and
/// are subtracted from cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeverEffects {
    // Income side
    pub rate_bump: f64,
    pub cap_lift: f64,
    pub immigration: f64,
    pub general_revenue: f64,
    pub benefit_tax: f64,

    // Cost side (reductions)
    pub retirement_age: f64,
    pub chained_cpi: f64,
    pub price_indexing: f64,
}

impl LeverEffects {
    /// Evaluate every lever for `year`, scaled by its phase-in fraction
    pub fn for_year(baseline: &Baseline, inputs: &PolicyInputs, year: u32, payroll: f64) -> Self {
        let start = baseline.start_year();
        let coeff = &baseline.coefficients;
        let years = &inputs.implementation;
        let phase = |target: Option<u32>| phase_in_fraction(year, start, target);

        let rate_bump = payroll
            * (inputs.combined_rate_step / units::RATE_STEP_PPT * coeff.combined_rate * phase(years.combined_rate)
                + inputs.employee_rate_step / units::RATE_STEP_PPT * coeff.single_side_rate * phase(years.employee_rate)
                + inputs.employer_rate_step / units::RATE_STEP_PPT * coeff.single_side_rate * phase(years.employer_rate)
                + inputs.employer_surtax / units::RATE_STEP_PPT * coeff.single_side_rate * phase(years.employer_surtax));

        let cap_lift = wage_gain_pct(inputs.cap_option) / units::WAGE_GAIN_PPT
            * coeff.wage_share
            * payroll
            * phase(years.wage_cap);

        let ramp = baseline.immigration_ramp.factor(year.saturating_sub(start));
        let immigration = inputs.immigration_boost_m / units::IMMIGRATION_MILLIONS
            * coeff.immigration
            * payroll
            * ramp
            * phase(years.immigration);

        let general_revenue = inputs.general_revenue_b * phase(years.general_revenue);

        let tax = &baseline.benefit_taxation;
        let benefit_phase = phase(years.benefit_tax);
        let middle = tax.baseline_middle_pct + (inputs.middle_inclusion_pct - tax.baseline_middle_pct) * benefit_phase;
        let upper = tax.baseline_upper_pct + (inputs.upper_inclusion_pct - tax.baseline_upper_pct) * benefit_phase;
        let benefit_tax = benefit_tax_delta(tax, middle, upper, payroll);

        let retirement_age = inputs.retirement_age_delay / units::RETIREMENT_YEARS
            * coeff.retirement_age
            * payroll
            * phase(years.retirement_age);

        let chained_cpi = if inputs.chained_cpi {
            coeff.chained_cpi * payroll * phase(years.chained_cpi)
        } else {
            0.0
        };

        let price_indexing = inputs.price_indexing_pct / units::PRICE_INDEXING_PPT
            * coeff.price_indexing
            * payroll
            * phase(years.price_indexing);

        Self {
            rate_bump,
            cap_lift,
            immigration,
            general_revenue,
            benefit_tax,
            retirement_age,
            chained_cpi,
            price_indexing,
        }
    }

    pub fn income_total(&self) -> f64 {
        self.rate_bump + self.cap_lift + self.immigration + self.general_revenue + self.benefit_tax
    }

    pub fn cost_reduction_total(&self) -> f64 {
        self.retirement_age + self.chained_cpi + self.price_indexing
    }
}
