//! `tarot settings`

use clap::Subcommand;
use tarot_core::{resolve_llm_config, DefaultLlmConfig, LlmRoute, LlmSettings};
use tarot_llm::{fetch_default_config, LlmClient};

use super::Context;
use crate::format;

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show stored settings and the configuration a reading would use
    Show,

    /// Store your own endpoint and key
    Set {
        /// Base URL of an OpenAI-compatible API, e.g. https://api.openai.com/v1
        #[arg(long)]
        base_url: String,

        #[arg(long)]
        api_key: String,

        /// Model name; the default model is used when omitted
        #[arg(long)]
        model: Option<String>,
    },

    /// Check that the stored endpoint accepts the stored key
    Test,

    /// Remove stored settings
    Clear,
}

pub async fn run(ctx: &Context, command: SettingsCommand) -> Result<(), Box<dyn std::error::Error>> {
    let settings = ctx.settings();

    match command {
        SettingsCommand::Show => {
            let stored = settings.load()?;
            let defaults = fetch_default_config(&ctx.proxy_url).await;
            println!("{}", describe(&stored, &defaults));
        }
        SettingsCommand::Set {
            base_url,
            api_key,
            model,
        } => {
            let saved = settings.save(&base_url, &api_key, model.as_deref())?;
            println!("Saved settings for {}", saved.base_url.unwrap_or_default());
        }
        SettingsCommand::Test => {
            let stored = settings.load()?;
            let (Some(base_url), Some(api_key)) = (stored.base_url, stored.api_key) else {
                return Err("Set a base URL and API key first with `tarot settings set`.".into());
            };
            LlmClient::test_connection(&base_url, &api_key).await?;
            println!("Connection OK: {}", base_url);
        }
        SettingsCommand::Clear => {
            settings.clear()?;
            println!("Cleared settings.");
        }
    }
    Ok(())
}

/// Stored values (key masked) and the effective configuration.
fn describe(stored: &LlmSettings, defaults: &DefaultLlmConfig) -> String {
    let unset = || "(not set)".to_string();
    let mut out = format!(
        "Base URL: {}\nAPI key:  {}\nModel:    {}\n\n",
        stored.base_url.clone().unwrap_or_else(unset),
        stored
            .api_key
            .as_deref()
            .map(format::mask_secret)
            .unwrap_or_else(unset),
        stored.model.clone().unwrap_or_else(unset),
    );

    let effective = match resolve_llm_config(stored, defaults) {
        Some(resolved) => match resolved.route {
            LlmRoute::Direct { base_url, .. } => {
                format!("Using your settings: {} with model {}", base_url, resolved.model)
            }
            LlmRoute::Proxy => {
                format!("Using the default configuration with model {}", resolved.model)
            }
        },
        None => "Not configured: readings are unavailable until you run `tarot settings set`."
            .to_string(),
    };
    out.push_str(&effective);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::scratch_context;

    #[test]
    fn test_describe_masks_key_and_reports_route() {
        let stored = LlmSettings::new("https://api.example.com/v1", "sk-1234567890abcd", None);
        let text = describe(&stored, &DefaultLlmConfig::unavailable());

        assert!(text.contains("API key:  sk-...abcd"));
        assert!(!text.contains("1234567890"));
        assert!(text.contains("Using your settings: https://api.example.com/v1 with model gpt-4o-mini"));
    }

    #[test]
    fn test_describe_default_and_unconfigured() {
        let defaults = DefaultLlmConfig::new(true, Some("server-model".into()));
        let text = describe(&LlmSettings::default(), &defaults);
        assert!(text.contains("Using the default configuration with model server-model"));

        let text = describe(&LlmSettings::default(), &DefaultLlmConfig::unavailable());
        assert!(text.contains("Not configured"));
    }

    #[tokio::test]
    async fn test_set_and_clear() {
        let (ctx, dir) = scratch_context();

        run(
            &ctx,
            SettingsCommand::Set {
                base_url: " https://api.example.com/v1 ".into(),
                api_key: "sk-test".into(),
                model: Some("  ".into()),
            },
        )
        .await
        .unwrap();

        let stored = ctx.settings().load().unwrap();
        assert_eq!(stored.base_url.as_deref(), Some("https://api.example.com/v1"));
        assert!(stored.model.is_none());

        run(&ctx, SettingsCommand::Clear).await.unwrap();
        assert_eq!(ctx.settings().load().unwrap(), LlmSettings::default());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_set_rejects_blank_key() {
        let (ctx, dir) = scratch_context();
        let result = run(
            &ctx,
            SettingsCommand::Set {
                base_url: "https://api.example.com/v1".into(),
                api_key: " ".into(),
                model: None,
            },
        )
        .await;
        assert!(result.is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_without_settings_fails_before_network() {
        let (ctx, dir) = scratch_context();
        assert!(run(&ctx, SettingsCommand::Test).await.is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
