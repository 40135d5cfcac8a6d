//! Policy lever inputs consumed by the projection engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolvencyError};

/// Wage-base cap adjustment
///
/// Each named tier carries a calibrated covered-wage gain; `Custom` carries
/// the gain percentage directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CapOption {
    #[serde(rename = "status quo")]
    StatusQuo,
    #[serde(rename = "+50 %")]
    Plus50,
    #[serde(rename = "+75 %")]
    Plus75,
    #[serde(rename = "+100 %")]
    Plus100,
    #[serde(rename = "No cap")]
    NoCap,
    #[serde(rename = "Custom %")]
    Custom(f64),
}

impl CapOption {
    /// Label used in presets and on the command line
    pub fn label(&self) -> &'static str {
        match self {
            CapOption::StatusQuo => "status quo",
            CapOption::Plus50 => "+50 %",
            CapOption::Plus75 => "+75 %",
            CapOption::Plus100 => "+100 %",
            CapOption::NoCap => "No cap",
            CapOption::Custom(_) => "Custom %",
        }
    }
}

impl Default for CapOption {
    fn default() -> Self {
        CapOption::StatusQuo
    }
}

impl fmt::Display for CapOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapOption::Custom(pct) => write!(f, "custom:{}", pct),
            other => f.write_str(other.label()),
        }
    }
}

impl FromStr for CapOption {
    type Err = SolvencyError;

    /// Accepts the tier labels (`status quo`, `+50 %`, `+75 %`, `+100 %`,
    /// `No cap`) or `custom:<pct>`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let option = match s {
            "status quo" => CapOption::StatusQuo,
            "+50 %" => CapOption::Plus50,
            "+75 %" => CapOption::Plus75,
            "+100 %" => CapOption::Plus100,
            "No cap" => CapOption::NoCap,
            _ => {
                let pct = s
                    .strip_prefix("custom:")
                    .and_then(|pct| pct.trim().parse::<f64>().ok())
                    .ok_or_else(|| SolvencyError::UnknownCapOption(s.to_string()))?;
                CapOption::Custom(pct)
            }
        };
        Ok(option)
    }
}

/// Year by which each lever is fully phased in
///
/// `None` means the lever takes full effect in the first projection year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationYears {
    pub combined_rate: Option<u32>,
    pub employee_rate: Option<u32>,
    pub employer_rate: Option<u32>,
    pub employer_surtax: Option<u32>,
    pub wage_cap: Option<u32>,
    pub retirement_age: Option<u32>,
    pub chained_cpi: Option<u32>,
    pub price_indexing: Option<u32>,
    pub immigration: Option<u32>,
    pub equity_shift: Option<u32>,
    pub general_revenue: Option<u32>,
    pub benefit_tax: Option<u32>,
}

impl ImplementationYears {
    /// Every lever fully phased in by the same year
    pub fn all(year: u32) -> Self {
        Self {
            combined_rate: Some(year),
            employee_rate: Some(year),
            employer_rate: Some(year),
            employer_surtax: Some(year),
            wage_cap: Some(year),
            retirement_age: Some(year),
            chained_cpi: Some(year),
            price_indexing: Some(year),
            immigration: Some(year),
            equity_shift: Some(year),
            general_revenue: Some(year),
            benefit_tax: Some(year),
        }
    }
}

/// Complete set of policy levers for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyInputs {
    /// Combined employee + employer payroll tax change (ppt)
    pub combined_rate_step: f64,
    /// Employee-only payroll tax change (ppt)
    pub employee_rate_step: f64,
    /// Employer-only payroll tax change (ppt)
    pub employer_rate_step: f64,
    /// Employer-only surtax (ppt)
    pub employer_surtax: f64,
    pub cap_option: CapOption,
    /// Full retirement age increase (years)
    pub retirement_age_delay: f64,
    pub chained_cpi: bool,
    /// Share of earners moved to price indexing (%)
    pub price_indexing_pct: f64,
    /// Extra net immigrants per year (millions)
    pub immigration_boost_m: f64,
    /// Trust fund assets moved into equities ($B)
    pub equity_shift_b: f64,
    /// Annual general revenue transfer ($B)
    pub general_revenue_b: f64,
    /// Share of middle-band benefits subject to income tax (%)
    pub middle_inclusion_pct: f64,
    /// Share of upper-band benefits subject to income tax (%)
    pub upper_inclusion_pct: f64,
    pub implementation: ImplementationYears,
}

impl PolicyInputs {
    /// Current law: every lever at its no-op value
    pub fn status_quo() -> Self {
        Self {
            combined_rate_step: 0.0,
            employee_rate_step: 0.0,
            employer_rate_step: 0.0,
            employer_surtax: 0.0,
            cap_option: CapOption::StatusQuo,
            retirement_age_delay: 0.0,
            chained_cpi: false,
            price_indexing_pct: 0.0,
            immigration_boost_m: 0.0,
            equity_shift_b: 0.0,
            general_revenue_b: 0.0,
            middle_inclusion_pct: 50.0,
            upper_inclusion_pct: 85.0,
            implementation: ImplementationYears::default(),
        }
    }

    /// Built-in reform package mixing revenue, benefit and investment levers
    pub fn sample_reform() -> Self {
        Self {
            combined_rate_step: 0.4,
            cap_option: CapOption::Plus75,
            retirement_age_delay: 5.0,
            immigration_boost_m: 2.5,
            equity_shift_b: 175.0,
            middle_inclusion_pct: 60.0,
            upper_inclusion_pct: 100.0,
            implementation: ImplementationYears {
                combined_rate: Some(2034),
                employee_rate: Some(2040),
                employer_rate: Some(2040),
                employer_surtax: Some(2040),
                wage_cap: Some(2028),
                retirement_age: Some(2050),
                chained_cpi: Some(2030),
                price_indexing: Some(2035),
                immigration: None,
                equity_shift: None,
                general_revenue: None,
                benefit_tax: Some(2030),
            },
            ..Self::status_quo()
        }
    }

    /// Reject values the engine cannot give meaning to
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("combined_rate_step", self.combined_rate_step),
            ("employee_rate_step", self.employee_rate_step),
            ("employer_rate_step", self.employer_rate_step),
            ("employer_surtax", self.employer_surtax),
            ("retirement_age_delay", self.retirement_age_delay),
            ("price_indexing_pct", self.price_indexing_pct),
            ("immigration_boost_m", self.immigration_boost_m),
            ("equity_shift_b", self.equity_shift_b),
            ("general_revenue_b", self.general_revenue_b),
            ("middle_inclusion_pct", self.middle_inclusion_pct),
            ("upper_inclusion_pct", self.upper_inclusion_pct),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                return Err(invalid(field, format!("not finite: {}", value)));
            }
        }

        for (field, value) in [
            ("immigration_boost_m", self.immigration_boost_m),
            ("equity_shift_b", self.equity_shift_b),
            ("general_revenue_b", self.general_revenue_b),
        ] {
            if value < 0.0 {
                return Err(invalid(field, format!("must not be negative, got {}", value)));
            }
        }

        let percentages = [
            ("price_indexing_pct", self.price_indexing_pct),
            ("middle_inclusion_pct", self.middle_inclusion_pct),
            ("upper_inclusion_pct", self.upper_inclusion_pct),
        ];
        for (field, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(field, format!("must be within 0..=100, got {}", value)));
            }
        }

        if let CapOption::Custom(pct) = self.cap_option {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(invalid("cap_option", format!("custom gain must be within 0..=100, got {}", pct)));
            }
        }

        Ok(())
    }
}

impl Default for PolicyInputs {
    fn default() -> Self {
        Self::status_quo()
    }
}

fn invalid(field: &'static str, reason: String) -> SolvencyError {
    SolvencyError::InvalidInput { field, reason }
}
