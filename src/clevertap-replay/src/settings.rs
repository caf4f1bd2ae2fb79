use std::path::Path;

use clevertap_core::{DestinationConfig, HostConfig, HostLogLevel};
use serde::Deserialize;

/// Replay settings. Loaded from an optional TOML file, then environment
/// variables with the prefix `CLEVERTAP_REPLAY__` (e.g.
/// `CLEVERTAP_REPLAY__ACCOUNT_ID`).
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_token: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub legacy_trait_filter: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "error".to_string()
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            account_token: None,
            region: None,
            legacy_trait_filter: false,
            log_level: default_log_level(),
        }
    }
}

impl ReplayConfig {
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix("CLEVERTAP_REPLAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    pub fn destination(&self) -> DestinationConfig {
        DestinationConfig {
            account_id: self.account_id.clone(),
            account_token: self.account_token.clone(),
            region: self.region.clone(),
            legacy_trait_filter: self.legacy_trait_filter,
        }
    }

    pub fn host(&self) -> anyhow::Result<HostConfig> {
        let log_level: HostLogLevel = self.log_level.parse()?;
        Ok(HostConfig { log_level })
    }
}
