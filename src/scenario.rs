//! Scenario runner for repeated projections
//!
//! Loads the baseline once, then runs any number of policy plans against
//! it. The engine owns no shared state, so independent plans are projected
//! in parallel.

use rayon::prelude::*;

use crate::error::Result;
use crate::projection::{check_horizon_year, extend, ApproximateRow, ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::{Baseline, PolicyInputs};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for plan in [PolicyInputs::status_quo(), PolicyInputs::sample_reform()] {
///     let result = runner.run(&plan, ProjectionConfig::default())?;
///     println!("{:?}", result.depletion_year());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    baseline: Baseline,
}

impl ScenarioRunner {
    /// Create runner with the in-memory default baseline
    pub fn new() -> Self {
        Self {
            baseline: Baseline::ssa_2024_intermediate(),
        }
    }

    /// Create runner by loading the baseline from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            baseline: Baseline::from_csv()?,
        })
    }

    /// Create runner from a specific baseline directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self {
            baseline: Baseline::from_csv_path(path)?,
        })
    }

    /// Create runner with a pre-built baseline
    pub fn with_baseline(baseline: Baseline) -> Self {
        Self { baseline }
    }

    /// Validate the inputs and config, then run a single projection
    pub fn run(&self, inputs: &PolicyInputs, config: ProjectionConfig) -> Result<ProjectionResult> {
        config.validate()?;
        inputs.validate()?;
        let engine = ProjectionEngine::new(self.baseline.clone(), config);
        let result = engine.project(inputs);
        log::info!(
            "projected {} years, depletion {:?}",
            result.yearly.len(),
            result.depletion
        );
        Ok(result)
    }

    /// Run several plans with the same config, in parallel
    ///
    /// Fails on the first plan that does not validate; results keep the
    /// order of `plans`.
    pub fn run_batch(&self, plans: &[PolicyInputs], config: ProjectionConfig) -> Result<Vec<ProjectionResult>> {
        config.validate()?;
        for plan in plans {
            plan.validate()?;
        }

        let engine = ProjectionEngine::new(self.baseline.clone(), config);
        let results: Vec<ProjectionResult> = plans.par_iter().map(|plan| engine.project(plan)).collect();
        log::info!("projected {} plans", results.len());
        Ok(results)
    }

    /// Approximate rows after `result` through `through_year`, using this
    /// baseline's extension growth rates
    pub fn extend(&self, result: &ProjectionResult, through_year: u32) -> Result<Vec<ApproximateRow>> {
        check_horizon_year("extend_through", through_year)?;
        Ok(extend(result, through_year, &self.baseline.rates))
    }

    /// Get reference to the baseline for inspection
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Get mutable reference to the baseline for sensitivity runs
    pub fn baseline_mut(&mut self) -> &mut Baseline {
        &mut self.baseline
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
