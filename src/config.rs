//! Tap configuration
//!
//! The configuration is a JSON object supplied with `--config`. Several files
//! may be given; later files override keys from earlier ones.

use crate::error::{Error, Result};
use crate::types::{JsonObject, OptionStringExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// Default Transifex REST API base URL
pub const DEFAULT_API_URL: &str = "https://rest.api.transifex.com";

/// Runtime configuration for the tap
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TapConfig {
    /// API token for Transifex
    #[serde(default)]
    pub token: String,

    /// Earliest datetime to get data from (accepted, not used by full-table streams)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Override for the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Override for the User-Agent header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("token", &"<redacted>")
            .field("start_date", &self.start_date)
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl TapConfig {
    /// Create a config with just a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Set the API base URL
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Build a config from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::config("Config must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| Error::config(format!("Invalid config: {e}")))
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Load and merge config files, later files taking precedence
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = JsonObject::new();
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::config(format!("Failed to read config file {}: {e}", path.display()))
            })?;
            let value: Value = serde_json::from_str(&content).map_err(|e| {
                Error::config(format!("Invalid config JSON in {}: {e}", path.display()))
            })?;
            match value {
                Value::Object(map) => merged.extend(map),
                _ => {
                    return Err(Error::config(format!(
                        "Config file {} must contain a JSON object",
                        path.display()
                    )))
                }
            }
        }
        Self::from_value(Value::Object(merged))
    }

    /// Check that required settings are present
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::missing_field("token"));
        }
        if let Some(url) = &self.api_url {
            url::Url::parse(url).map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        }
        Ok(())
    }

    /// Effective API base URL
    pub fn base_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// User agent override, if any
    pub fn user_agent_override(&self) -> Option<String> {
        self.user_agent.clone().none_if_empty()
    }

    /// JSON Schema describing accepted settings
    pub fn config_jsonschema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "token": {
                    "type": "string",
                    "secret": true,
                    "writeOnly": true,
                    "description": "API Token for Transifex"
                },
                "start_date": {
                    "type": "string",
                    "format": "date-time",
                    "description": "Earliest datetime to get data from"
                },
                "api_url": {
                    "type": "string",
                    "format": "uri",
                    "default": DEFAULT_API_URL,
                    "description": "Base URL of the Transifex REST API"
                },
                "user_agent": {
                    "type": "string",
                    "description": "User-Agent header sent with every request"
                }
            },
            "required": ["token"]
        })
    }
}
