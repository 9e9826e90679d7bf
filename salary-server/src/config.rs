//! Server configuration from an optional TOML file.
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 3005
//! log_level = "info"
//! log_file = "salary-server.log"
//!
//! [rates]
//! backend = "open-er-api"
//! fallback_rate = 4000
//! cache_ttl_secs = 3600
//!
//! [tax]
//! uvt = 52374
//! smlmv = 1750905
//! brackets_file = "brackets.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use salary_core::{RateConfig, TaxConstants, TaxConstantsError};
use salary_data::{BracketLoader, BracketLoaderError};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3005;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid bracket file: {0}")]
    Brackets(#[from] BracketLoaderError),

    #[error("Invalid tax constants: {0}")]
    Tax(#[from] TaxConstantsError),
}

/// Overrides applied on top of the 2026 reference constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxConfig {
    pub year: Option<i32>,
    pub uvt: Option<Decimal>,
    pub smlmv: Option<Decimal>,
    /// CSV file replacing the FSP and/or withholding tables.
    pub brackets_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub rates: RateConfig,
    pub tax: TaxConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            log_file: None,
            rates: RateConfig::default(),
            tax: TaxConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the validated tax constants for this configuration.
    ///
    /// A relative `brackets_file` is resolved against the working directory.
    pub fn tax_constants(&self) -> Result<TaxConstants, ConfigError> {
        let mut constants = TaxConstants::colombia_2026();
        if let Some(year) = self.tax.year {
            constants.year = year;
        }
        if let Some(uvt) = self.tax.uvt {
            constants.uvt = uvt;
        }
        if let Some(smlmv) = self.tax.smlmv {
            constants.smlmv = smlmv;
        }

        if let Some(path) = &self.tax.brackets_file {
            constants = BracketLoader::load_from_file(path, constants)?;
        }

        constants.validate()?;
        Ok(constants)
    }
}
