//! CSV-based baseline loader
//!
//! Loads the baseline trust fund tables from CSV files in data/baseline/

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use super::series::BaselineYear;
use crate::error::{Result, SolvencyError};

/// Default path to the baseline directory
pub const DEFAULT_BASELINE_PATH: &str = "data/baseline";

#[derive(Debug, Deserialize)]
struct SeriesRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Income")]
    income: f64,
    #[serde(rename = "Cost")]
    cost: f64,
    #[serde(rename = "Assets")]
    assets: f64,
}

/// Load the yearly income / cost / assets series
pub fn load_series(path: &Path) -> Result<Vec<BaselineYear>> {
    let file = File::open(path.join("baseline_series.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: SeriesRow = result?;
        rows.push(BaselineYear {
            year: row.year,
            income: row.income,
            cost: row.cost,
            assets: row.assets,
        });
    }

    Ok(rows)
}

/// Load scalar parameters (payroll, coefficients, rates)
/// Returns HashMap<parameter_name, value>
pub fn load_parameters(path: &Path) -> Result<HashMap<String, f64>> {
    let file = File::open(path.join("parameters.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut params = HashMap::new();
    for result in reader.deserialize() {
        let (name, value): (String, f64) = result?;
        params.insert(name, value);
    }

    Ok(params)
}

/// Load immigration ramp factors, ordered by years since start
pub fn load_immigration_ramp(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path.join("immigration_ramp.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries: Vec<(u32, f64)> = Vec::new();
    for result in reader.deserialize() {
        let entry: (u32, f64) = result?;
        entries.push(entry);
    }

    ramp_factors(entries)
}

/// Order ramp entries by offset; offsets must cover exactly `0..n`
fn ramp_factors(mut entries: Vec<(u32, f64)>) -> Result<Vec<f64>> {
    entries.sort_by_key(|&(offset, _)| offset);

    for (expected, &(offset, _)) in entries.iter().enumerate() {
        if offset as usize != expected {
            return Err(SolvencyError::InvalidParameter {
                name: "immigration_ramp".to_string(),
                reason: format!("expected year offset {}, found {}", expected, offset),
            });
        }
    }

    Ok(entries.into_iter().map(|(_, factor)| factor).collect())
}

/// Raw baseline tables as read from disk
pub struct LoadedBaseline {
    pub series: Vec<BaselineYear>,
    pub parameters: HashMap<String, f64>,
    pub immigration_ramp: Vec<f64>,
}

impl LoadedBaseline {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_BASELINE_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            series: load_series(path)?,
            parameters: load_parameters(path)?,
            immigration_ramp: load_immigration_ramp(path)?,
        })
    }
}
