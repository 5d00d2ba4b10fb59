//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the pay
//! policy and seed data from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PayrollError, PayrollResult};

use super::types::{PayPolicy, PayrollConfig, PolicyFile, SeedData, ServerSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml   # Pay rules and server settings (required)
/// └── seed.yaml     # Companies, departments, employees and custom columns (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Tax rate: {}", loader.policy().tax_rate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing, if any file contains
    /// invalid YAML, or if the policy values are out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy_file = Self::load_yaml::<PolicyFile>(&policy_path)?;
        policy_file
            .policy
            .validate()
            .map_err(|e| PayrollError::ConfigParse {
                path: policy_path.display().to_string(),
                message: e.to_string(),
            })?;

        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Self::load_yaml::<SeedData>(&seed_path)?
        } else {
            debug!(path = %seed_path.display(), "No seed file, starting empty");
            SeedData::default()
        };

        info!(
            path = %path.display(),
            tax_rate = %policy_file.policy.tax_rate,
            companies = seed.companies.len(),
            employees = seed.employees.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(policy_file.policy, policy_file.server, seed),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the pay policy.
    pub fn policy(&self) -> &PayPolicy {
        self.config.policy()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        self.config.server()
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        self.config.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll_engine_{}_{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy().tax_rate, Decimal::from_str("0.20").unwrap());
        assert_eq!(loader.policy().salary_periods_per_year, 26);
    }

    #[test]
    fn test_seed_data_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.seed().companies.len(), 3);
        assert!(loader.seed().employees.iter().any(|e| e.employee_number == "EMP001"));
        let health = loader
            .seed()
            .custom_columns
            .iter()
            .find(|c| c.name == "Health Insurance")
            .unwrap();
        assert!(health.is_deduction && health.not_subject_to_withholding);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(PayrollError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_seed_is_empty() {
        let dir = scratch_dir("no_seed");
        fs::write(
            dir.join("policy.yaml"),
            "policy:\n  tax_rate: \"0.25\"\n  overtime_multiplier: \"2\"\n  salary_periods_per_year: 52\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.seed().employees.is_empty());
        assert_eq!(loader.policy().salary_periods_per_year, 52);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad_yaml");
        fs::write(dir.join("policy.yaml"), "policy: [unclosed").unwrap();

        match ConfigLoader::load(&dir) {
            Err(PayrollError::ConfigParse { path, .. }) => assert!(path.contains("policy.yaml")),
            other => panic!("Expected ConfigParse error, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_out_of_range_policy_returns_parse_error() {
        let dir = scratch_dir("bad_policy");
        fs::write(
            dir.join("policy.yaml"),
            "policy:\n  tax_rate: \"1.5\"\n  overtime_multiplier: \"1.5\"\n  salary_periods_per_year: 26\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(PayrollError::ConfigParse { message, .. }) => assert!(message.contains("tax_rate")),
            other => panic!("Expected ConfigParse error, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }
}
