//! Baseline actuarial tables: the reference trajectory, payroll projection,
//! lever coefficients and return rates

mod series;
mod coefficients;
pub mod loader;

pub use series::{BaselineSeries, BaselineYear, PayrollProjection};
pub use coefficients::{units, BenefitTaxation, Coefficients, ImmigrationRamp, ReturnRates};
pub use loader::LoadedBaseline;

use std::path::Path;

use crate::error::Result;
use coefficients::param;

/// Container for everything the projection engine treats as fixed input
///
/// Loaded once and passed to the engine explicitly; nothing here is
/// mutated during a projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub series: BaselineSeries,
    pub coefficients: Coefficients,
    pub benefit_taxation: BenefitTaxation,
    pub rates: ReturnRates,
    pub immigration_ramp: ImmigrationRamp,
}

impl Baseline {
    /// SSA 2024 intermediate baseline with the stylized coefficients
    pub fn ssa_2024_intermediate() -> Self {
        Self {
            series: BaselineSeries::ssa_2024_intermediate(),
            coefficients: Coefficients::stylized(),
            benefit_taxation: BenefitTaxation::current_law(),
            rates: ReturnRates::intermediate(),
            immigration_ramp: ImmigrationRamp::four_year(),
        }
    }

    /// Load the baseline from CSV files in the default location (data/baseline/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_BASELINE_PATH))
    }

    /// Load the baseline from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedBaseline::load_from(path)?;
        Self::from_loaded(loaded)
    }

    pub fn from_loaded(loaded: LoadedBaseline) -> Result<Self> {
        let params = &loaded.parameters;
        let base_year = loaded.series.first().map(|row| row.year).unwrap_or_default();

        let payroll = PayrollProjection {
            base_year,
            base: param(params, "payroll_base")?,
            growth_rate: param(params, "payroll_growth_rate")?,
            max_growth_rate: param(params, "max_payroll_growth_rate")?,
        };

        Ok(Self {
            coefficients: Coefficients::from_loaded(params)?,
            benefit_taxation: BenefitTaxation::from_loaded(params)?,
            rates: ReturnRates::from_loaded(params)?,
            immigration_ramp: ImmigrationRamp::new(loaded.immigration_ramp)?,
            series: BaselineSeries::new(loaded.series, payroll)?,
        })
    }

    /// First simulated year; every policy lever starts phasing in here
    pub fn start_year(&self) -> u32 {
        self.series.first_year()
    }
}
