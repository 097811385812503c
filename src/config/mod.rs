#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_url, Validate};
use serde::{Deserialize, Serialize};
use toml_config::{TomlConfig, LOG_LEVELS};

/// Effective settings after layering: command line over config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub log_level: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: None,
        }
    }
}

impl SearchConfig {
    pub fn resolve(base_url_override: Option<&str>, file: Option<&TomlConfig>) -> Result<Self> {
        let base_url = base_url_override
            .or_else(|| file.and_then(TomlConfig::base_url))
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();
        let log_level = file.and_then(TomlConfig::log_level).map(str::to_lowercase);

        let config = Self { base_url, log_level };
        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for SearchConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(level) = &self.log_level {
            validate_one_of("log_level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
