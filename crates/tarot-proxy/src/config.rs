//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use tarot_core::{normalize, parse_flag, DefaultLlmConfig, FALLBACK_MODEL};

/// Proxy server configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Whether the default credentials may be used at all.
    pub enabled: bool,
    /// Base URL of the upstream OpenAI-compatible API.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Model used when a request does not name one.
    pub model: Option<String>,
}

/// Upstream endpoint and key, present only when the defaults are usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
}

impl Upstream<'_> {
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PROXY_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `DEFAULT_LLM_ENABLED` | `true`/`1`/`yes`/`on` enables the defaults | disabled |
    /// | `DEFAULT_LLM_BASE_URL` | Upstream API base URL | (none) |
    /// | `DEFAULT_LLM_API_KEY` | Upstream API key | (none) |
    /// | `DEFAULT_LLM_MODEL` | Model for requests without one | `gpt-4o-mini` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = normalize(lookup("PROXY_ADDR").as_deref())
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        Ok(Self {
            addr,
            enabled: parse_flag(lookup("DEFAULT_LLM_ENABLED").as_deref()),
            base_url: normalize(lookup("DEFAULT_LLM_BASE_URL").as_deref())
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key: normalize(lookup("DEFAULT_LLM_API_KEY").as_deref()),
            model: normalize(lookup("DEFAULT_LLM_MODEL").as_deref()),
        })
    }

    /// The upstream to forward to, if the defaults are enabled and complete.
    pub fn upstream(&self) -> Option<Upstream<'_>> {
        if !self.enabled {
            return None;
        }
        Some(Upstream {
            base_url: self.base_url.as_deref()?,
            api_key: self.api_key.as_deref()?,
        })
    }

    pub fn is_available(&self) -> bool {
        self.upstream().is_some()
    }

    /// Model for requests that leave it blank.
    pub fn default_model(&self) -> &str {
        self.model.as_deref().unwrap_or(FALLBACK_MODEL)
    }

    /// What clients may learn about the defaults. Never includes the key.
    pub fn public_config(&self) -> DefaultLlmConfig {
        DefaultLlmConfig::new(self.is_available(), self.model.clone())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PROXY_ADDR format")]
    InvalidAddr,
}
