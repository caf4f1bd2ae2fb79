use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IntegrationError, IntegrationResult};

/// Region value the dashboard stores when no data-center region was chosen.
pub const REGION_NONE: &str = "none";

/// Destination settings delivered by the host, keyed the way the dashboard
/// stores them (`accountId`, `accountToken`, `region`).
///
/// Each key is read on its own: a value of the wrong type is treated as
/// absent rather than failing the whole config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationConfig {
    #[serde(default, deserialize_with = "lenient_string")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub account_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: Option<String>,
    /// Filter identify traits down to scalars before profile mapping. This
    /// reproduces the older destination plugin, where nested `address` and
    /// `company` traits were discarded instead of flattened.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub legacy_trait_filter: bool,
}

impl DestinationConfig {
    /// Parse the host's raw destination config. Only a JSON object is
    /// accepted.
    pub fn from_json(value: &serde_json::Value) -> IntegrationResult<Self> {
        if !value.is_object() {
            return Err(IntegrationError::InvalidConfig(json_kind(value)));
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Account id and token, both required. Only absent values count as
    /// missing; an empty string is handed to the SDK as is.
    pub fn credentials(&self) -> IntegrationResult<Credentials> {
        let account_id = self
            .account_id
            .clone()
            .ok_or(IntegrationError::MissingCredential("accountId"))?;
        let account_token = self
            .account_token
            .clone()
            .ok_or(IntegrationError::MissingCredential("accountToken"))?;
        Ok(Credentials {
            account_id,
            account_token,
            region: Region::from_setting(self.region.as_deref()),
        })
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(
        serde_json::Value::deserialize(d)?,
        serde_json::Value::Bool(true)
    ))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: String,
    pub account_token: String,
    pub region: Region,
}

/// Data-center region for the engagement platform account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// No explicit region; the SDK uses its default endpoint.
    Default,
    Named(String),
}

impl Region {
    /// Interpret the dashboard setting. An absent value, an empty string and
    /// the literal sentinel `"none"` all mean [`Region::Default`].
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting {
            None | Some("") | Some(REGION_NONE) => Region::Default,
            Some(name) => Region::Named(name.to_string()),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Region::Default => None,
            Region::Named(name) => Some(name),
        }
    }
}

/// The host client's log-level enumeration, with its raw integer values.
/// Raw values outside the known range read as the default level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum HostLogLevel {
    None = 0,
    #[default]
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
}

impl From<i64> for HostLogLevel {
    fn from(raw: i64) -> Self {
        match raw {
            0 => HostLogLevel::None,
            2 => HostLogLevel::Warning,
            3 => HostLogLevel::Info,
            4 => HostLogLevel::Debug,
            5 => HostLogLevel::Verbose,
            _ => HostLogLevel::Error,
        }
    }
}

impl From<HostLogLevel> for i64 {
    fn from(level: HostLogLevel) -> Self {
        level as i64
    }
}

impl FromStr for HostLogLevel {
    type Err = IntegrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(HostLogLevel::None),
            "error" => Ok(HostLogLevel::Error),
            "warning" | "warn" => Ok(HostLogLevel::Warning),
            "info" => Ok(HostLogLevel::Info),
            "debug" => Ok(HostLogLevel::Debug),
            "verbose" => Ok(HostLogLevel::Verbose),
            other => other
                .parse::<i64>()
                .map(HostLogLevel::from)
                .map_err(|_| IntegrationError::UnknownLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for HostLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostLogLevel::None => "none",
            HostLogLevel::Error => "error",
            HostLogLevel::Warning => "warning",
            HostLogLevel::Info => "info",
            HostLogLevel::Debug => "debug",
            HostLogLevel::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

/// The engagement SDK's three debug levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SdkLogLevel {
    Off = -1,
    Info = 0,
    Debug = 1,
}

/// Run-mode settings of the host client that the integration reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default)]
    pub log_level: HostLogLevel,
}

/// Server-side source configuration fetched by the host, listing the
/// destinations enabled for this source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default)]
    pub destinations: Vec<ServerDestination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDestination {
    pub display_name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub config: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl ServerConfig {
    /// Find the enabled destination whose display name matches `key`,
    /// ignoring ASCII case.
    pub fn destination(&self, key: &str) -> IntegrationResult<&ServerDestination> {
        self.destinations
            .iter()
            .find(|d| d.enabled && d.display_name.eq_ignore_ascii_case(key))
            .ok_or_else(|| IntegrationError::DestinationNotFound(key.to_string()))
    }
}
