use crate::config::toml_config::TomlConfig;
use crate::config::SearchConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "country-search")]
#[command(about = "Look up a country by name on the REST Countries API")]
pub struct CliConfig {
    #[arg(help = "Country names to search; reads one name per line from stdin when omitted")]
    pub names: Vec<String>,

    #[arg(long, help = "Override the API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }

    pub fn resolve(&self) -> Result<SearchConfig> {
        self.validate()?;
        let file = self.load_file()?;
        SearchConfig::resolve(self.base_url.as_deref(), file.as_ref())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_url("--base-url", base_url)?;
        }
        Ok(())
    }
}
