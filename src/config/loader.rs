//! Policy loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading the pay
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::PayPolicy;

/// Loads and provides access to the pay policy.
///
/// The `PolicyLoader` reads `policy.yaml` from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/dtr/
/// └── policy.yaml   # Overtime threshold, multiplier, transition policy
/// ```
///
/// # Example
///
/// ```no_run
/// use dtr_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/dtr").unwrap();
/// println!("Daily threshold: {}h", loader.policy().daily_overtime_threshold);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy: PayPolicy,
}

impl PolicyLoader {
    /// Loads the policy from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/dtr")
    ///
    /// # Returns
    ///
    /// Returns a `PolicyLoader` instance on success, or an error if:
    /// - `policy.yaml` is missing
    /// - The file contains invalid YAML
    /// - The policy values are out of range (negative threshold, or a
    ///   multiplier below 1)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy: PayPolicy =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::validate(&policy, &path_str)?;

        Ok(Self { policy })
    }

    fn validate(policy: &PayPolicy, path: &str) -> EngineResult<()> {
        if policy.daily_overtime_threshold < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!(
                    "daily_overtime_threshold must be non-negative, got {}",
                    policy.daily_overtime_threshold
                ),
            });
        }
        if policy.overtime_multiplier < Decimal::ONE {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!(
                    "overtime_multiplier must be at least 1, got {}",
                    policy.overtime_multiplier
                ),
            });
        }
        Ok(())
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    /// Consumes the loader and returns the policy.
    pub fn into_policy(self) -> PayPolicy {
        self.policy
    }
}
