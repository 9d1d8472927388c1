//! LLM credential resolution.
//!
//! Two configuration sources exist: the settings a user typed in, and a
//! default configuration held by the proxy server. The resolver picks between
//! them without touching storage or the environment, so the same inputs
//! always produce the same answer.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Model used when neither source names one.
pub const FALLBACK_MODEL: &str = "gpt-4o-mini";

/// User-entered LLM settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Base URL of an OpenAI-compatible API (e.g. "https://api.openai.com/v1").
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl LlmSettings {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
            model,
        }
    }

    /// Whether both the base URL and the key are present and non-blank.
    pub fn is_complete(&self) -> bool {
        normalize(self.base_url.as_deref()).is_some() && normalize(self.api_key.as_deref()).is_some()
    }
}

/// What a client knows about the server's default configuration.
///
/// The credentials themselves never leave the proxy; clients only learn
/// whether the default route is usable and which model it prefers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultLlmConfig {
    /// True only when the defaults are enabled and fully specified.
    pub available: bool,
    pub model: Option<String>,
}

impl DefaultLlmConfig {
    pub fn new(available: bool, model: Option<String>) -> Self {
        Self { available, model }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Where chat requests should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmRoute {
    /// Call the user's endpoint with the user's key.
    Direct { base_url: String, api_key: String },
    /// Call the local proxy, which injects the default credentials.
    Proxy,
}

/// The effective configuration for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLlmConfig {
    pub route: LlmRoute,
    pub model: String,
}

impl ResolvedLlmConfig {
    pub fn uses_default(&self) -> bool {
        self.route == LlmRoute::Proxy
    }
}

/// Resolve effective credentials.
///
/// Precedence is user settings (base URL and key both present), then the
/// default configuration when available, then nothing. The model falls back
/// from the user's choice to the default model to [`FALLBACK_MODEL`].
pub fn resolve_llm_config(
    user: &LlmSettings,
    defaults: &DefaultLlmConfig,
) -> Option<ResolvedLlmConfig> {
    let model = normalize(user.model.as_deref())
        .or_else(|| normalize(defaults.model.as_deref()))
        .unwrap_or_else(|| FALLBACK_MODEL.to_string());

    let base_url = normalize(user.base_url.as_deref());
    let api_key = normalize(user.api_key.as_deref());

    let route = match (base_url, api_key) {
        (Some(base_url), Some(api_key)) => LlmRoute::Direct {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        },
        _ if defaults.available => LlmRoute::Proxy,
        _ => return None,
    };

    Some(ResolvedLlmConfig { route, model })
}

/// Like [`resolve_llm_config`], but an unconfigured result is an error.
pub fn require_llm_config(
    user: &LlmSettings,
    defaults: &DefaultLlmConfig,
) -> Result<ResolvedLlmConfig, SettingsError> {
    resolve_llm_config(user, defaults).ok_or(SettingsError::Unconfigured)
}

/// Trim a value, treating blank strings as absent.
pub fn normalize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an enable flag: "true", "1", "yes" or "on" (case-insensitive).
pub fn parse_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        None => false,
    }
}
