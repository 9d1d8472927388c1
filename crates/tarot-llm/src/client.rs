//! HTTP client for OpenAI-compatible chat completions.
//!
//! Requests go either straight to the user's endpoint with their key, or to
//! the local proxy, which attaches the default credentials server-side.

use reqwest::{Client, Response};
use reqwest_eventsource::retry::Never;
use reqwest_eventsource::RequestBuilderExt;
use tarot_core::{DefaultLlmConfig, LlmRoute, ResolvedLlmConfig};
use tracing::{debug, info, warn};

use crate::api_types::{ChatCompletionRequest, ChatMessage};
use crate::error::LlmError;
use crate::prompt::{hash_prompt, SYSTEM_PROMPT};
use crate::stream::AnalysisStream;

/// Proxy address used when none is configured.
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";

/// Where chat requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// `{base_url}/chat/completions` with a bearer key.
    Upstream { base_url: String, api_key: String },
    /// `{base_url}/api/chat` on the proxy, without a key.
    Proxy { base_url: String },
}

impl ChatTarget {
    pub fn chat_url(&self) -> String {
        match self {
            ChatTarget::Upstream { base_url, .. } => format!("{}/chat/completions", base_url),
            ChatTarget::Proxy { base_url } => format!("{}/api/chat", base_url),
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, ChatTarget::Proxy { .. })
    }
}

/// Streaming chat client.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    target: ChatTarget,
    model: String,
    system_prompt: String,
    system_prompt_hash: String,
}

impl LlmClient {
    pub fn new(target: ChatTarget, model: impl Into<String>) -> Result<Self, LlmError> {
        let http = Client::builder().build().map_err(|e| {
            LlmError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        let target = match target {
            ChatTarget::Upstream { base_url, api_key } => ChatTarget::Upstream {
                base_url: trim_base(&base_url),
                api_key,
            },
            ChatTarget::Proxy { base_url } => ChatTarget::Proxy {
                base_url: trim_base(&base_url),
            },
        };
        let model = model.into();

        info!(
            "LLM client initialized with model: {}, via proxy: {}",
            model,
            target.is_proxy()
        );

        Ok(Self {
            http,
            target,
            model,
            system_prompt: SYSTEM_PROMPT.to_string(),
            system_prompt_hash: hash_prompt(SYSTEM_PROMPT),
        })
    }

    /// Build a client for resolved credentials. `proxy_url` is only used for
    /// the default route and falls back to [`DEFAULT_PROXY_URL`].
    pub fn from_resolved(
        resolved: &ResolvedLlmConfig,
        proxy_url: Option<&str>,
    ) -> Result<Self, LlmError> {
        let target = match &resolved.route {
            LlmRoute::Direct { base_url, api_key } => ChatTarget::Upstream {
                base_url: base_url.clone(),
                api_key: api_key.clone(),
            },
            LlmRoute::Proxy => ChatTarget::Proxy {
                base_url: proxy_url.unwrap_or(DEFAULT_PROXY_URL).to_string(),
            },
        };
        Self::new(target, resolved.model.clone())
    }

    /// Replace the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self.system_prompt_hash = hash_prompt(&self.system_prompt);
        self
    }

    pub fn target(&self) -> &ChatTarget {
        &self.target
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Fingerprint of the system prompt, for correlating logs.
    pub fn system_prompt_hash(&self) -> &str {
        &self.system_prompt_hash
    }

    /// Start a streaming chat completion.
    pub async fn stream_chat(&self, messages: Vec<ChatMessage>) -> Result<AnalysisStream, LlmError> {
        let url = self.target.chat_url();
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            stream: true,
        };

        info!(
            model = %self.model,
            prompt = %self.system_prompt_hash,
            "Requesting streamed analysis"
        );
        debug!("Sending chat request to {}", url);

        let mut builder = self.http.post(&url).json(&request);
        if let ChatTarget::Upstream { api_key, .. } = &self.target {
            builder = builder.bearer_auth(api_key);
        }

        let mut source = builder
            .eventsource()
            .map_err(|e| LlmError::Configuration(format!("Failed to create event stream: {}", e)))?;
        // One request per reading; a dropped stream is reported, not retried.
        source.set_retry_policy(Box::new(Never));

        AnalysisStream::open(source).await
    }

    /// Check that an endpoint accepts a key by listing its models.
    pub async fn test_connection(base_url: &str, api_key: &str) -> Result<(), LlmError> {
        let http = Client::new();
        let url = format!("{}/models", trim_base(base_url));
        debug!("Testing connection to {}", url);

        let response = http
            .get(&url)
            .bearer_auth(api_key.trim())
            .send()
            .await
            .map_err(|e| LlmError::Network(format!("Failed to send request: {}", e)))?;

        check_status(response).await?;
        info!("Connection test succeeded");
        Ok(())
    }
}

/// Ask the proxy whether its default configuration is usable.
///
/// Any failure is logged and reported as unavailable.
pub async fn fetch_default_config(proxy_url: &str) -> DefaultLlmConfig {
    let url = format!("{}/api/config", trim_base(proxy_url));

    let response = match Client::new().get(&url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            warn!("Default config request failed with {}", response.status());
            return DefaultLlmConfig::unavailable();
        }
        Err(e) => {
            debug!("Proxy not reachable at {}: {}", url, e);
            return DefaultLlmConfig::unavailable();
        }
    };

    match response.json::<DefaultLlmConfig>().await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse default config: {}", e);
            DefaultLlmConfig::unavailable()
        }
    }
}

async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let details = response.text().await.unwrap_or_default();
    Err(LlmError::from_status(status, details))
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_urls() {
        let upstream = ChatTarget::Upstream {
            base_url: "https://api.example.com/v1".into(),
            api_key: "sk".into(),
        };
        let proxy = ChatTarget::Proxy {
            base_url: "http://localhost:3000".into(),
        };

        assert_eq!(upstream.chat_url(), "https://api.example.com/v1/chat/completions");
        assert_eq!(proxy.chat_url(), "http://localhost:3000/api/chat");
        assert!(proxy.is_proxy());
        assert!(!upstream.is_proxy());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = LlmClient::new(
            ChatTarget::Proxy {
                base_url: "http://localhost:3000/".into(),
            },
            "m",
        )
        .unwrap();
        assert_eq!(client.target().chat_url(), "http://localhost:3000/api/chat");
    }

    #[test]
    fn test_from_resolved_routes() {
        let direct = ResolvedLlmConfig {
            route: LlmRoute::Direct {
                base_url: "https://api.example.com/v1".into(),
                api_key: "sk-user".into(),
            },
            model: "gpt-4o".into(),
        };
        let client = LlmClient::from_resolved(&direct, Some("http://ignored")).unwrap();
        assert_eq!(
            client.target(),
            &ChatTarget::Upstream {
                base_url: "https://api.example.com/v1".into(),
                api_key: "sk-user".into()
            }
        );
        assert_eq!(client.model(), "gpt-4o");

        let proxied = ResolvedLlmConfig {
            route: LlmRoute::Proxy,
            model: "gpt-4o-mini".into(),
        };
        let client = LlmClient::from_resolved(&proxied, None).unwrap();
        assert_eq!(
            client.target(),
            &ChatTarget::Proxy {
                base_url: DEFAULT_PROXY_URL.into()
            }
        );
    }

    #[test]
    fn test_with_system_prompt_updates_hash() {
        let client = LlmClient::new(
            ChatTarget::Proxy {
                base_url: DEFAULT_PROXY_URL.into(),
            },
            "m",
        )
        .unwrap();
        let original = client.system_prompt_hash().to_string();
        assert_eq!(original, hash_prompt(SYSTEM_PROMPT));

        let client = client.with_system_prompt("Be brief.");
        assert_eq!(client.system_prompt(), "Be brief.");
        assert_ne!(client.system_prompt_hash(), original);
    }
}
