//! roomshare.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::AssignmentPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomshareConfig {
    pub engine: Option<EngineConfig>,
    pub input: Option<InputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub capacity: Option<usize>,
    pub adult_age: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the closed student batch (JSON array of records).
    pub path: Option<PathBuf>,
}

impl RoomshareConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RoomshareConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a config with every default written out.
    pub fn scaffold(input: &str) -> Self {
        let defaults = AssignmentPolicy::default();
        RoomshareConfig {
            engine: Some(EngineConfig {
                capacity: Some(defaults.capacity),
                adult_age: Some(defaults.adult_age),
            }),
            input: Some(InputConfig {
                path: Some(PathBuf::from(input)),
            }),
        }
    }

    /// Resolve the engine policy, filling gaps with defaults.
    pub fn policy(&self) -> anyhow::Result<AssignmentPolicy> {
        let defaults = AssignmentPolicy::default();
        let engine = self.engine.clone().unwrap_or_default();
        let policy = AssignmentPolicy::new(
            engine.capacity.unwrap_or(defaults.capacity),
            engine.adult_age.unwrap_or(defaults.adult_age),
        )?;
        Ok(policy)
    }

    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_ref()?.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold() {
        let config = RoomshareConfig::scaffold("students.json");
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("capacity = 5"));
        assert!(toml_str.contains("students.json"));
    }

    #[test]
    fn test_parse_minimal() {
        let toml_str = r#"
[engine]
capacity = 4
"#;
        let config: RoomshareConfig = toml::from_str(toml_str).unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.capacity, 4);
        assert_eq!(policy.adult_age, 18);
        assert!(config.input_path().is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RoomshareConfig = toml::from_str("").unwrap();
        assert_eq!(config.policy().unwrap(), AssignmentPolicy::default());
    }

    #[test]
    fn test_rejects_tiny_capacity() {
        let config: RoomshareConfig = toml::from_str("[engine]\ncapacity = 1\n").unwrap();
        let err = config.policy().unwrap_err();
        assert!(err.to_string().contains("at least 2, got 1"));
    }

    #[test]
    fn test_input_path() {
        let config: RoomshareConfig =
            toml::from_str("[input]\npath = \"data/cohort.json\"\n").unwrap();
        assert_eq!(config.input_path(), Some(Path::new("data/cohort.json")));
    }
}
