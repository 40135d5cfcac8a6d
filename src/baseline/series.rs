//! Baseline trust fund series and taxable payroll projection

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolvencyError};

/// Largest gap tolerated between a published asset figure and the
/// roll-forward of the prior year's assets ($B)
const ROLL_FORWARD_TOLERANCE: f64 = 0.05;

/// One published baseline year ($B)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineYear {
    pub year: u32,
    /// Total income, including interest on trust fund assets
    pub income: f64,
    pub cost: f64,
    /// End-of-year assets
    pub assets: f64,
}

impl BaselineYear {
    pub fn surplus(&self) -> f64 {
        self.income - self.cost
    }
}

/// Taxable payroll growth from the base year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayrollProjection {
    pub base_year: u32,
    /// Taxable payroll in the base year ($B)
    pub base: f64,
    pub growth_rate: f64,
    /// Ceiling applied to `growth_rate`
    pub max_growth_rate: f64,
}

impl PayrollProjection {
    /// Taxable payroll for a year at or after the base year
    pub fn payroll(&self, year: u32) -> f64 {
        debug_assert!(year >= self.base_year, "payroll requested for {year} before base year {}", self.base_year);
        let growth = self.growth_rate.min(self.max_growth_rate);
        let elapsed = year.saturating_sub(self.base_year) as i32;
        self.base * (1.0 + growth).powi(elapsed)
    }
}

/// Immutable baseline trajectory the projection starts from
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineSeries {
    rows: Vec<BaselineYear>,
    payroll: PayrollProjection,
}

impl BaselineSeries {
    /// Build a series from yearly rows, checking that years are consecutive
    /// and that each year's assets are the prior year's assets plus surplus
    /// (floored at zero)
    pub fn new(rows: Vec<BaselineYear>, payroll: PayrollProjection) -> Result<Self> {
        let first = rows.first().ok_or(SolvencyError::EmptyBaseline)?;

        if !(payroll.base.is_finite() && payroll.base > 0.0) {
            return Err(SolvencyError::InvalidParameter {
                name: "payroll_base".to_string(),
                reason: format!("must be positive, got {}", payroll.base),
            });
        }
        if payroll.base_year != first.year {
            return Err(SolvencyError::InvalidParameter {
                name: "payroll_base_year".to_string(),
                reason: format!("must equal first baseline year {}, got {}", first.year, payroll.base_year),
            });
        }

        for pair in rows.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.year != prev.year + 1 {
                return Err(SolvencyError::NonConsecutiveYears {
                    previous: prev.year,
                    next: next.year,
                });
            }
            let expected = (prev.assets + next.surplus()).max(0.0);
            if (expected - next.assets).abs() > ROLL_FORWARD_TOLERANCE {
                return Err(SolvencyError::InconsistentAssets {
                    year: next.year,
                    expected,
                    found: next.assets,
                });
            }
        }

        Ok(Self { rows, payroll })
    }

    /// Build a series from parallel columns
    pub fn from_columns(
        years: &[u32],
        income: &[f64],
        cost: &[f64],
        assets: &[f64],
        payroll: PayrollProjection,
    ) -> Result<Self> {
        if years.len() != income.len() || years.len() != cost.len() || years.len() != assets.len() {
            return Err(SolvencyError::MismatchedBaseline {
                years: years.len(),
                income: income.len(),
                cost: cost.len(),
                assets: assets.len(),
            });
        }

        let rows = years
            .iter()
            .zip(income)
            .zip(cost)
            .zip(assets)
            .map(|(((&year, &income), &cost), &assets)| BaselineYear { year, income, cost, assets })
            .collect();

        Self::new(rows, payroll)
    }

    /// SSA 2024 Trustees Report intermediate projection, 2024-2033
    ///
    /// Assets are the exact roll-forward of the published income and cost;
    /// the published asset column drifts by $0.1B from rounding.
    pub fn ssa_2024_intermediate() -> Self {
        const YEARS: [u32; 10] = [2024, 2025, 2026, 2027, 2028, 2029, 2030, 2031, 2032, 2033];
        const INCOME: [f64; 10] = [1192.6, 1224.8, 1291.3, 1348.8, 1410.6, 1472.6, 1535.1, 1599.7, 1665.1, 1732.3];
        const COST: [f64; 10] = [1323.0, 1405.4, 1485.1, 1570.0, 1660.6, 1753.3, 1847.9, 1943.7, 2040.5, 2138.2];
        const ASSETS: [f64; 10] = [2511.1, 2330.5, 2136.7, 1915.5, 1665.5, 1384.8, 1072.0, 728.0, 352.6, 0.0];

        let rows = (0..YEARS.len())
            .map(|i| BaselineYear {
                year: YEARS[i],
                income: INCOME[i],
                cost: COST[i],
                assets: ASSETS[i],
            })
            .collect();

        Self {
            rows,
            payroll: PayrollProjection {
                base_year: 2024,
                base: 9700.0,
                growth_rate: 0.0375,
                max_growth_rate: 0.06,
            },
        }
    }

    pub fn rows(&self) -> &[BaselineYear] {
        &self.rows
    }

    pub fn payroll(&self) -> &PayrollProjection {
        &self.payroll
    }

    pub fn first_year(&self) -> u32 {
        self.rows[0].year
    }

    pub fn last_year(&self) -> u32 {
        self.rows[self.rows.len() - 1].year
    }

    /// Row for a year inside the baseline horizon
    pub fn get(&self, year: u32) -> Option<&BaselineYear> {
        let idx = year.checked_sub(self.first_year())? as usize;
        self.rows.get(idx)
    }

    /// Assets at the beginning of the first baseline year
    pub fn opening_assets(&self) -> f64 {
        let first = &self.rows[0];
        first.assets - first.surplus()
    }

    /// Income and cost as shares of payroll in the last baseline year,
    /// used to carry the baseline past its horizon
    pub fn terminal_ratios(&self) -> (f64, f64) {
        let last = &self.rows[self.rows.len() - 1];
        let payroll = self.payroll.payroll(last.year);
        (last.income / payroll, last.cost / payroll)
    }
}
