//! Persisted user LLM settings.

use tarot_core::{normalize, LlmSettings};
use tracing::info;

use crate::error::{SettingsStoreError, StoreError};
use crate::keys;
use crate::kv::KeyValueStore;

/// User-entered API base URL, key and model on top of a durable store.
#[derive(Debug)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<LlmSettings, StoreError> {
        Ok(LlmSettings {
            base_url: self.store.get(keys::API_BASE_URL)?,
            api_key: self.store.get(keys::API_KEY)?,
            model: self.store.get(keys::API_MODEL)?,
        })
    }

    /// Save trimmed settings. Base URL and key are required; a blank model
    /// is stored as absent so the default model applies.
    pub fn save(
        &self,
        base_url: &str,
        api_key: &str,
        model: Option<&str>,
    ) -> Result<LlmSettings, SettingsStoreError> {
        let (Some(base_url), Some(api_key)) = (normalize(Some(base_url)), normalize(Some(api_key)))
        else {
            return Err(SettingsStoreError::Incomplete);
        };
        let model = normalize(model);

        self.store.set(keys::API_BASE_URL, &base_url)?;
        self.store.set(keys::API_KEY, &api_key)?;
        match &model {
            Some(model) => self.store.set(keys::API_MODEL, model)?,
            None => self.store.remove(keys::API_MODEL)?,
        }

        info!(base_url = %base_url, model = ?model, "Saved LLM settings");

        Ok(LlmSettings {
            base_url: Some(base_url),
            api_key: Some(api_key),
            model,
        })
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::API_BASE_URL)?;
        self.store.remove(keys::API_KEY)?;
        self.store.remove(keys::API_MODEL)?;
        info!("Cleared LLM settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_save_and_load() {
        let settings = SettingsStore::new(MemoryStore::new());
        let saved = settings
            .save(" https://api.example.com/v1 ", " sk-test ", Some("gpt-4o"))
            .unwrap();

        assert_eq!(saved.base_url.as_deref(), Some("https://api.example.com/v1"));
        assert_eq!(saved.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.load().unwrap(), saved);
        assert!(saved.is_complete());
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let settings = SettingsStore::new(MemoryStore::new());
        assert!(matches!(
            settings.save("https://api.example.com", "  ", None),
            Err(SettingsStoreError::Incomplete)
        ));
        assert!(matches!(
            settings.save("", "sk", None),
            Err(SettingsStoreError::Incomplete)
        ));
        assert_eq!(settings.load().unwrap(), LlmSettings::default());
    }

    #[test]
    fn test_blank_model_removes_previous_model() {
        let settings = SettingsStore::new(MemoryStore::new());
        settings.save("https://a", "k", Some("model-a")).unwrap();
        settings.save("https://a", "k", Some("  ")).unwrap();

        assert_eq!(settings.load().unwrap().model, None);
    }

    #[test]
    fn test_clear() {
        let settings = SettingsStore::new(MemoryStore::new());
        settings.save("https://a", "k", None).unwrap();
        settings.clear().unwrap();
        assert_eq!(settings.load().unwrap(), LlmSettings::default());
    }
}
