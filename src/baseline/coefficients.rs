//! Calibrated lever sensitivities, benefit taxation terms and return rates
//!
//! Every coefficient is a share of the current year's taxable payroll per
//! calibration unit of its lever. The unit divisors live in [`units`] and
//! must not change without recalibrating the matching coefficient.

use std::collections::HashMap;

use crate::error::{Result, SolvencyError};

/// Calibration units the coefficients were fitted against
pub mod units {
    /// Payroll tax rate steps: 0.1 percentage point
    pub const RATE_STEP_PPT: f64 = 0.1;
    /// Wage-base expansion: 5 percentage points of covered wages
    pub const WAGE_GAIN_PPT: f64 = 5.0;
    /// Full retirement age: 1 year of delay
    pub const RETIREMENT_YEARS: f64 = 1.0;
    /// Price indexing: 10 percentage points of earners covered
    pub const PRICE_INDEXING_PPT: f64 = 10.0;
    /// Immigration: 1 million additional net workers per year
    pub const IMMIGRATION_MILLIONS: f64 = 1.0;
}

/// Lever sensitivities (share of payroll per calibration unit)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Income per 0.1 ppt of combined employee + employer rate
    pub combined_rate: f64,
    /// Income per 0.1 ppt of a one-sided rate (employee-only, employer-only, employer surtax)
    pub single_side_rate: f64,
    /// Income per 5 ppt of additional covered wages
    pub wage_share: f64,
    /// Cost reduction per year of retirement age delay
    pub retirement_age: f64,
    /// Cost reduction with chained CPI indexing switched on
    pub chained_cpi: f64,
    /// Cost reduction per 10 ppt of earners moved to price indexing
    pub price_indexing: f64,
    /// Income per 1M extra net immigrants per year, once fully ramped
    pub immigration: f64,
}

impl Coefficients {
    pub fn stylized() -> Self {
        Self {
            combined_rate: 0.00099,
            single_side_rate: 0.00050,
            wage_share: 0.0038,
            retirement_age: 0.0030,
            chained_cpi: 0.0040,
            price_indexing: 0.0011,
            immigration: 0.0013,
        }
    }

    pub fn from_loaded(params: &HashMap<String, f64>) -> Result<Self> {
        Ok(Self {
            combined_rate: param(params, "coeff_combined_rate")?,
            single_side_rate: param(params, "coeff_single_side_rate")?,
            wage_share: param(params, "coeff_wage_share")?,
            retirement_age: param(params, "coeff_retirement_age")?,
            chained_cpi: param(params, "coeff_chained_cpi")?,
            price_indexing: param(params, "coeff_price_indexing")?,
            immigration: param(params, "coeff_immigration")?,
        })
    }
}

/// Income taxation of benefits credited to the trust fund
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenefitTaxation {
    /// Marginal income tax rate applied to taxable benefits
    pub marginal_rate: f64,
    /// Middle-income band benefits as a share of payroll
    pub middle_share: f64,
    /// Upper-income band benefits as a share of payroll
    pub upper_share: f64,
    /// Current-law inclusion percentage for the middle band
    pub baseline_middle_pct: f64,
    /// Current-law inclusion percentage for the upper band
    pub baseline_upper_pct: f64,
}

impl BenefitTaxation {
    pub fn current_law() -> Self {
        Self {
            marginal_rate: 0.22,
            middle_share: 0.012,
            upper_share: 0.023,
            baseline_middle_pct: 50.0,
            baseline_upper_pct: 85.0,
        }
    }

    pub fn from_loaded(params: &HashMap<String, f64>) -> Result<Self> {
        Ok(Self {
            marginal_rate: param(params, "benefit_tax_marginal_rate")?,
            middle_share: param(params, "benefit_tax_middle_share")?,
            upper_share: param(params, "benefit_tax_upper_share")?,
            baseline_middle_pct: param(params, "baseline_middle_inclusion_pct")?,
            baseline_upper_pct: param(params, "baseline_upper_inclusion_pct")?,
        })
    }
}

/// Fixed annual rates used by the asset sleeves and the approximate extension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnRates {
    /// Interest on the treasury sleeve, credited past the baseline horizon
    pub treasury_interest: f64,
    /// Nominal return compounding the equity sleeve every year
    pub equity_return: f64,
    /// Income growth for rows projected beyond the engine horizon
    pub extension_income_growth: f64,
    /// Cost growth for rows projected beyond the engine horizon
    pub extension_cost_growth: f64,
}

impl ReturnRates {
    pub fn intermediate() -> Self {
        Self {
            treasury_interest: 0.046,
            equity_return: 0.065,
            extension_income_growth: 0.040,
            extension_cost_growth: 0.045,
        }
    }

    pub fn from_loaded(params: &HashMap<String, f64>) -> Result<Self> {
        Ok(Self {
            treasury_interest: param(params, "treasury_interest_rate")?,
            equity_return: param(params, "equity_return_rate")?,
            extension_income_growth: param(params, "extension_income_growth")?,
            extension_cost_growth: param(params, "extension_cost_growth")?,
        })
    }
}

/// Share of the full immigration effect reached N years after the start
#[derive(Debug, Clone, PartialEq)]
pub struct ImmigrationRamp {
    factors: Vec<f64>,
}

impl ImmigrationRamp {
    pub fn new(factors: Vec<f64>) -> Result<Self> {
        if let Some(bad) = factors.iter().find(|f| !(0.0..=1.0).contains(*f)) {
            return Err(SolvencyError::InvalidParameter {
                name: "immigration_ramp".to_string(),
                reason: format!("factor {} outside [0, 1]", bad),
            });
        }
        Ok(Self { factors })
    }

    /// Four-year ramp to full labor-force effect
    pub fn four_year() -> Self {
        Self {
            factors: vec![0.4, 0.6, 0.75, 0.9],
        }
    }

    /// Ramp factor; full effect once past the end of the table
    pub fn factor(&self, years_since_start: u32) -> f64 {
        self.factors.get(years_since_start as usize).copied().unwrap_or(1.0)
    }

    pub fn factors(&self) -> &[f64] {
        &self.factors
    }
}

/// Look up a named parameter, rejecting missing or non-finite values
pub(crate) fn param(params: &HashMap<String, f64>, name: &str) -> Result<f64> {
    let value = *params
        .get(name)
        .ok_or_else(|| SolvencyError::MissingParameter(name.to_string()))?;
    if !value.is_finite() {
        return Err(SolvencyError::InvalidParameter {
            name: name.to_string(),
            reason: format!("not finite: {}", value),
        });
    }
    Ok(value)
}
