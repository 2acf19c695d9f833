//! Seed employee loading from config.toml
//!
//! Employees listed in config.toml are registered on startup if their scan code
//! is not already in the database. The file is optional.

use crate::core::employee::NewEmployee;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Employees to register on startup
    #[serde(default)]
    pub employees: Vec<EmployeeConfig>,
}

/// Configuration for a single seed employee
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeConfig {
    /// Badge scan code, e.g. `"TI001"`
    pub scan_code: String,
    /// Display name
    pub name: String,
    /// Starting quota; defaults to the monthly allowance
    pub remaining_quota: Option<i32>,
}

impl From<EmployeeConfig> for NewEmployee {
    fn from(value: EmployeeConfig) -> Self {
        Self {
            scan_code: value.scan_code,
            name: value.name,
            remaining_quota: value.remaining_quota,
        }
    }
}

/// Loads seed employee configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref())?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed employees from ./config.toml, returning an empty config if the file is absent.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config(path)
}
