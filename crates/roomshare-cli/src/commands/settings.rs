//! Resolve the effective run settings from flags, `roomshare.toml` and
//! defaults, in that order of precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roomshare_core::{AssignmentPolicy, RoomshareConfig};
use roomshare_core::config::EngineConfig;
use tracing::debug;

pub const DEFAULT_CONFIG: &str = "roomshare.toml";
pub const DEFAULT_INPUT: &str = "students.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub policy: AssignmentPolicy,
}

pub fn resolve(input: Option<&str>, config: Option<&str>, capacity: Option<usize>) -> Result<Settings> {
    let (mut config, config_dir) = load_config(config)?;

    if let Some(capacity) = capacity {
        config
            .engine
            .get_or_insert_with(EngineConfig::default)
            .capacity = Some(capacity);
    }
    let policy = config.policy()?;

    let input = match input {
        Some(path) => PathBuf::from(path),
        // A relative [input].path is relative to the config file.
        None => config
            .input_path()
            .map(|path| config_dir.join(path))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
    };

    debug!(input = %input.display(), capacity = policy.capacity, adult_age = policy.adult_age, "resolved settings");
    Ok(Settings { input, policy })
}

/// Load the config together with the directory it was read from. An
/// explicit config path must exist; the default one is optional.
fn load_config(path: Option<&str>) -> Result<(RoomshareConfig, PathBuf)> {
    let path = match path {
        Some(path) => Path::new(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if !default.is_file() {
                return Ok((RoomshareConfig::default(), PathBuf::new()));
            }
            default
        }
    };

    let config = RoomshareConfig::from_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((config, dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("roomshare.toml");
        std::fs::write(
            &config_path,
            "[engine]\ncapacity = 4\nadult_age = 21\n\n[input]\npath = \"cohort.json\"\n",
        )
        .unwrap();
        let config_str = config_path.to_str().unwrap();

        let from_config = resolve(None, Some(config_str), None).unwrap();
        assert_eq!(from_config.input, dir.path().join("cohort.json"));
        assert_eq!(from_config.policy.capacity, 4);
        assert_eq!(from_config.policy.adult_age, 21);

        let overridden = resolve(Some("other.json"), Some(config_str), Some(3)).unwrap();
        assert_eq!(overridden.input, PathBuf::from("other.json"));
        assert_eq!(overridden.policy.capacity, 3);
        assert_eq!(overridden.policy.adult_age, 21);
    }

    #[test]
    fn missing_explicit_config_fails() {
        let err = resolve(None, Some("/nonexistent/roomshare.toml"), None).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn capacity_flag_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("empty.toml");
        std::fs::write(&config_path, "").unwrap();

        assert!(resolve(None, config_path.to_str(), Some(1)).is_err());
    }

    #[test]
    fn config_input_path_is_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cohort = dir.path().join("cohort");
        std::fs::create_dir(&cohort).unwrap();
        let config_path = cohort.join("roomshare.toml");
        std::fs::write(&config_path, "[input]\npath = \"students.json\"\n").unwrap();

        let settings = resolve(None, config_path.to_str(), None).unwrap();
        assert_eq!(settings.input, cohort.join("students.json"));
    }

    #[test]
    fn absolute_config_input_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let batch = dir.path().join("batch.json");
        let config_path = dir.path().join("nested.toml");
        std::fs::write(
            &config_path,
            format!("[input]\npath = {:?}\n", batch.to_str().unwrap()),
        )
        .unwrap();

        let settings = resolve(None, config_path.to_str(), None).unwrap();
        assert_eq!(settings.input, batch);
    }
}
