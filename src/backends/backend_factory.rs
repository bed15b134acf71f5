use crate::backends::{LlmBackend, MockBackend};
#[cfg(feature = "openai-compatible")]
use crate::backends::{OpenAICompatibleBackend, OpenAICompatibleConfig};
use crate::config::{AppConfig, BackendConfig};
use anyhow::Result;
use std::sync::Arc;

pub trait BackendFactory {
    fn create(config: &BackendConfig, name: &str) -> Result<Arc<dyn LlmBackend>>;
}

#[cfg(feature = "openai-compatible")]
impl BackendFactory for OpenAICompatibleBackend {
    fn create(config: &BackendConfig, name: &str) -> Result<Arc<dyn LlmBackend>> {
        let defaults = OpenAICompatibleConfig::default();

        let openai_config = OpenAICompatibleConfig {
            name: name.to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone().unwrap_or(defaults.model),
            base_url: config.base_url.clone().unwrap_or(defaults.base_url),
            chat_api: config.chat_api.clone().unwrap_or(defaults.chat_api),
            temperature: config.temperature,
        };

        Ok(Arc::new(OpenAICompatibleBackend::new(openai_config)?))
    }
}

/// Build the named backend. `mock` needs no configuration; every other name
/// must have a `[backends.<name>]` table and is spoken to as OpenAI-compatible.
pub fn create_backend(backend_name: &str, config: &AppConfig) -> Result<Arc<dyn LlmBackend>> {
    if backend_name == "mock" {
        return Ok(Arc::new(MockBackend::new()));
    }

    let backend_config = config.get_backend_config(backend_name);

    match backend_config {
        #[cfg(feature = "openai-compatible")]
        Some(backend_config) => OpenAICompatibleBackend::create(backend_config, backend_name),
        _ => {
            let mut available = vec!["mock".to_string()];
            #[cfg(feature = "openai-compatible")]
            available.extend(config.backends.keys().cloned());

            anyhow::bail!(
                "Unknown backend: {}. Available backends: {}",
                backend_name,
                available.join(", ")
            );
        }
    }
}
