use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "investec-client";

pub const PRODUCTION_URL: &str = "https://openapi.investec.com";
pub const SANDBOX_URL: &str = "https://openapisandbox.investec.com";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub investec: InvestecConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InvestecConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_key: String,
    #[serde(default)]
    pub sandbox: bool,
    /// Overrides the environment host, e.g. for a local proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl InvestecConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.trim_end_matches('/').to_string();
        }
        match self.sandbox {
            true => SANDBOX_URL.to_string(),
            false => PRODUCTION_URL.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() || self.client_secret.is_empty() || self.api_key.is_empty() {
            return Err(Error::Config(
                "Investec client_id, client_secret and api_key must be set in config file"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found at {:?}. Please create one.",
                config_path
            )));
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.investec.validate()?;
        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Self::xdg_dirs()
            .place_config_file("config.toml")
            .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))
    }
}
