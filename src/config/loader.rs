//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! policy tables from YAML files.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, PayrollPolicy, ProfessionalTaxConfig, StatutoryConfig};

/// Loads and provides access to payroll policy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml           # Salary split and attendance policy
/// ├── statutory.yaml         # EPF and ESI rates and ceilings
/// └── professional_tax.yaml  # Professional-tax slabs
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let tax = loader.config().professional_tax().lookup(Decimal::new(25000, 0));
/// println!("Professional tax: {}", tax);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing, is not valid
    /// YAML, or holds values that fail validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollPolicy>(&path.join("payroll.yaml"))?;
        let statutory = Self::load_yaml::<StatutoryConfig>(&path.join("statutory.yaml"))?;
        let professional_tax =
            Self::load_yaml::<ProfessionalTaxConfig>(&path.join("professional_tax.yaml"))?;

        let config = EngineConfig::new(payroll, statutory, professional_tax)?;
        debug!(path = %path.display(), "Loaded payroll configuration");

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
