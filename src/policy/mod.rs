//! Policy lever inputs and named preset storage

mod data;
pub mod presets;

pub use data::{CapOption, ImplementationYears, PolicyInputs};
pub use presets::{load_preset, save_preset, NamedPreset};
