//! Projection engine: phase-in, lever translation, yearly state transition
//! and depletion resolution

mod state;
mod engine;
mod results;
pub mod depletion;
pub mod levers;
pub mod phase_in;

pub use state::ProjectionState;
pub use engine::{check_horizon_year, ProjectionEngine, ProjectionConfig, DEFAULT_END_YEAR, MAX_END_YEAR};
pub use results::{months_of_reserve, CHECKPOINT_YEAR, REFERENCE_SURPLUS_YEAR, ProjectionResult, ProjectionSummary, ReserveStatus, YearDetail, YearlyResult};
pub use depletion::{extend, resolve_depletion, ApproximateRow, Depletion};
pub use levers::{wage_gain_pct, LeverEffects};
pub use phase_in::phase_in_fraction;
