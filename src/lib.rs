//! Trust Fund Solvency - yearly projection engine for a public pension trust fund
//!
//! This library provides:
//! - Baseline actuarial tables (income, cost, assets, payroll) and lever coefficients
//! - Policy levers with linear phase-in to a target implementation year
//! - A yearly projection over split treasury and equity asset sleeves
//! - Depletion year detection, extrapolation and approximate extension rows
//! - Named preset storage and a batch scenario runner

pub mod error;
pub mod baseline;
pub mod policy;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::SolvencyError;
pub use baseline::Baseline;
pub use policy::{CapOption, ImplementationYears, NamedPreset, PolicyInputs};
pub use projection::{Depletion, ProjectionConfig, ProjectionEngine, ProjectionResult, YearlyResult};
pub use scenario::ScenarioRunner;
