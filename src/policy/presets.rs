//! Named preset persistence
//!
//! A preset is a single JSON blob: a name, a save timestamp and a full set
//! of policy inputs. Loading validates the inputs before handing them back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PolicyInputs;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPreset {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub inputs: PolicyInputs,
}

impl NamedPreset {
    /// Stamp a set of inputs with the current time
    pub fn new(name: impl Into<String>, inputs: PolicyInputs) -> Self {
        Self {
            name: name.into(),
            saved_at: Utc::now(),
            inputs,
        }
    }
}

/// Write a preset as pretty-printed JSON, replacing any existing file
pub fn save_preset<P: AsRef<Path>>(preset: &NamedPreset, path: P) -> Result<()> {
    preset.inputs.validate()?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, preset)?;
    writer.flush()?;
    Ok(())
}

/// Read a preset back and validate its inputs
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<NamedPreset> {
    let reader = BufReader::new(File::open(path)?);
    let preset: NamedPreset = serde_json::from_reader(reader)?;
    preset.inputs.validate()?;
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolvencyError;
    use crate::policy::CapOption;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("trust_fund_preset_{}_{}.json", tag, std::process::id()))
    }

    #[test]
    fn test_save_and_load_preset() {
        let path = temp_path("roundtrip");
        let mut inputs = PolicyInputs::sample_reform();
        inputs.cap_option = CapOption::Custom(12.5);
        let preset = NamedPreset::new("my plan", inputs);

        save_preset(&preset, &path).expect("save failed");
        let loaded = load_preset(&path).expect("load failed");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, preset);
    }

    #[test]
    fn test_saved_file_is_complete() {
        let path = temp_path("complete");
        let preset = NamedPreset::new("full", PolicyInputs::sample_reform());
        save_preset(&preset, &path).expect("save failed");

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.trim_end().ends_with('}'));
        let parsed: NamedPreset = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, preset);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let path = std::env::temp_dir().join("trust_fund_no_such_dir").join("preset.json");
        let preset = NamedPreset::new("nowhere", PolicyInputs::status_quo());
        assert!(matches!(save_preset(&preset, &path), Err(SolvencyError::Io(_))));
    }

    #[test]
    fn test_load_rejects_invalid_inputs() {
        let path = temp_path("invalid");
        let mut preset = NamedPreset::new("broken", PolicyInputs::status_quo());
        preset.inputs.middle_inclusion_pct = 150.0;
        std::fs::write(&path, serde_json::to_string(&preset).unwrap()).unwrap();

        let result = load_preset(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(SolvencyError::InvalidInput { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_preset(temp_path("missing"));
        assert!(matches!(result, Err(SolvencyError::Io(_))));
    }
}
