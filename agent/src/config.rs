use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

use crate::constants::{agent, http};

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "AGENT_CONFIG";

/// Agent configuration, built once at startup and shared through `AppState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub host: String,
    pub port: u16,
    pub agent_id: String,
    pub agent_name: String,
    pub agent_version: String,
    pub agent_description: String,
    pub tags: Vec<String>,
    pub reply_prefix: String,
    /// Externally reachable base URL used in discovery documents
    pub public_url: Option<String>,
    /// Where the greeting actions send their envelope
    pub backend_base: Option<String>,
    pub backend_timeout_seconds: u64,
    pub model_name: String,
    /// Honour `X-Forwarded-Proto`/`X-Forwarded-Host` when deriving the
    /// request origin. Only enable behind a proxy that sets or strips them;
    /// otherwise any client can steer discovery links and backend calls.
    pub trust_forwarded_headers: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: agent::DEFAULT_HOST.to_string(),
            port: agent::DEFAULT_PORT,
            agent_id: agent::DEFAULT_ID.to_string(),
            agent_name: agent::DEFAULT_NAME.to_string(),
            agent_version: agent::DEFAULT_VERSION.to_string(),
            agent_description: agent::DEFAULT_DESCRIPTION.to_string(),
            tags: agent::DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            reply_prefix: agent::DEFAULT_REPLY_PREFIX.to_string(),
            public_url: None,
            backend_base: None,
            backend_timeout_seconds: http::BACKEND_TIMEOUT_SECONDS,
            model_name: agent::DEFAULT_MODEL_NAME.to_string(),
            trust_forwarded_headers: false,
        }
    }
}

impl AgentConfig {
    /// Loads the TOML file named by `AGENT_CONFIG` (if any), then applies
    /// environment overrides.
    pub async fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow!("Failed to read config {}: {}", path, e))?;
                info!("Loaded configuration from {}", path);
                Self::from_toml_str(&content)?
            }
            _ => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("Failed to parse config: {}", e))
    }

    /// Applies overrides from `lookup`. Blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid PORT '{}': {}", port, e))?;
        }
        if let Some(id) = get("HELLO_AGENT_ID") {
            self.agent_id = id;
        }
        if let Some(name) = get("HELLO_AGENT_NAME") {
            self.agent_name = name;
        }
        if let Some(version) = get("HELLO_AGENT_VERSION") {
            self.agent_version = version;
        }
        if let Some(description) = get("HELLO_AGENT_DESCRIPTION") {
            self.agent_description = description;
        }
        if let Some(tags) = get("HELLO_AGENT_TAGS") {
            self.tags = tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
        }
        // An empty prefix is meaningful, so this one is not filtered.
        if let Some(prefix) = lookup("AGENT_REPLY_PREFIX") {
            self.reply_prefix = prefix;
        }
        if let Some(url) = get("PUBLIC_URL") {
            self.public_url = Some(url);
        }
        if let Some(url) = get("A2A_BACKEND_BASE") {
            self.backend_base = Some(url);
        }
        if let Some(seconds) = get("A2A_BACKEND_TIMEOUT_SECONDS") {
            self.backend_timeout_seconds = seconds
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid A2A_BACKEND_TIMEOUT_SECONDS '{}': {}", seconds, e))?;
        }
        if let Some(model) = get("OPENAI_MODEL_NAME") {
            self.model_name = model;
        }
        if let Some(flag) = get("TRUST_FORWARDED_HEADERS") {
            self.trust_forwarded_headers = parse_flag(&flag)
                .ok_or_else(|| anyhow!("Invalid TRUST_FORWARDED_HEADERS '{}'", flag))?;
        }

        debug!("Effective configuration: {:?}", self);
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
