//! Driver configuration stored in `studioprep.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Driver configuration (TOML).
///
/// This file is intended to be edited by humans. Missing fields default to
/// sensible values; a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DriverConfig {
    /// Where `chat` writes the generated prompt when the interview
    /// completes.
    pub artifact_path: String,

    /// Print the artifact to stdout only; skip the file write.
    pub print_only: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            artifact_path: "studio-prompt.md".to_string(),
            print_only: false,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.print_only && self.artifact_path.trim().is_empty() {
            return Err(anyhow!("artifact_path must be non-empty unless print_only is set"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DriverConfig::default()`.
pub fn load_config(path: &Path) -> Result<DriverConfig> {
    if !path.exists() {
        return Ok(DriverConfig::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: DriverConfig =
        toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("studioprep.toml")).expect("load");
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("studioprep.toml");
        fs::write(&path, "print_only = true\n").expect("write");

        let config = load_config(&path).expect("load");
        assert!(config.print_only);
        assert_eq!(config.artifact_path, "studio-prompt.md");
    }

    #[test]
    fn blank_artifact_path_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("studioprep.toml");
        fs::write(&path, "artifact_path = \"  \"\n").expect("write");

        assert!(load_config(&path).is_err());
    }
}
