//! Application configuration, loaded from an optional YAML file.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Argon2id cost parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordHashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DahiraConfig {
    pub association_name: String,
    pub currency: String,
    /// Prefixed to local 9-digit numbers when building reminder links
    pub default_country_code: String,
    pub recent_history_limit: usize,
    /// Goal assigned to members created without one
    pub default_annual_goal: f64,
    pub seed_demo_data: bool,
    /// Phone login accepts any non-empty code; disable to allow email login only
    pub phone_login_enabled: bool,
    pub password_hashing: PasswordHashingConfig,
}

impl Default for DahiraConfig {
    fn default() -> Self {
        Self {
            association_name: "Cahier Hainou nahim".to_string(),
            currency: "FCFA".to_string(),
            default_country_code: "221".to_string(),
            recent_history_limit: 10,
            default_annual_goal: 12000.0,
            seed_demo_data: true,
            phone_login_enabled: true,
            password_hashing: PasswordHashingConfig::default(),
        }
    }
}

impl DahiraConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: DahiraConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from the given path, or fall back to defaults when none is given
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Defaults with the cheapest Argon2 parameters, for tests
    pub fn for_testing() -> Self {
        Self {
            password_hashing: PasswordHashingConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "currency: \"XOF\"\nrecent_history_limit: 5").unwrap();

        let config = DahiraConfig::load(file.path()).unwrap();
        assert_eq!(config.currency, "XOF");
        assert_eq!(config.recent_history_limit, 5);
        assert_eq!(config.default_country_code, "221");
        assert_eq!(config.password_hashing, PasswordHashingConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = DahiraConfig::load("/definitely/not/here.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_no_path_means_defaults() {
        let config = DahiraConfig::load_or_default(None::<&str>).unwrap();
        assert_eq!(config, DahiraConfig::default());
    }

    #[test]
    fn test_shipped_sample_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/dahira.yaml");
        let config = DahiraConfig::load(path).unwrap();
        assert_eq!(config, DahiraConfig::default());
    }
}
