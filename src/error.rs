//! Error type shared by the baseline loader, policy inputs and presets

use thiserror::Error;

/// Errors raised before a projection runs
///
/// The projection engine itself never fails: anything that could make it
/// misbehave is rejected here, at load or parse time.
#[derive(Debug, Error)]
pub enum SolvencyError {
    #[error("unknown wage-base cap option: {0:?}")]
    UnknownCapOption(String),

    #[error("invalid policy input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("baseline series is empty")]
    EmptyBaseline,

    #[error("baseline columns have different lengths (years={years}, income={income}, cost={cost}, assets={assets})")]
    MismatchedBaseline {
        years: usize,
        income: usize,
        cost: usize,
        assets: usize,
    },

    #[error("baseline years must be consecutive: {previous} followed by {next}")]
    NonConsecutiveYears { previous: u32, next: u32 },

    #[error("baseline assets for {year} do not roll forward: expected {expected:.1}, found {found:.1}")]
    InconsistentAssets { year: u32, expected: f64, found: f64 },

    #[error("invalid baseline parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("missing baseline parameter `{0}`")]
    MissingParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolvencyError>;
