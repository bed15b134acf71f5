mod error;

pub use error::{ConfigError, ConfigResult};

use crate::console::VerbosityLevel;
use crate::context_management::CompactionConfig;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

const BACKEND_KEY_SUFFIXES: [&str; 5] = ["api_key", "model", "base_url", "chat_api", "temperature"];

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct BackendConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub chat_api: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub default_backend: String,
    pub backends: HashMap<String, BackendConfig>,
    pub verbosity: Option<String>,
    pub context: CompactionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_backend: "mock".to_string(),
            backends: HashMap::new(),
            verbosity: None,
            context: CompactionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `~/.config/shipdash/config.toml`, writing the defaults there first
    /// when the file does not exist yet.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply one assignment to the file at `path` and write it back.
    ///
    /// A missing file starts from the defaults. A file that fails to parse is
    /// left untouched and its error returned.
    pub fn set_in_file(path: &Path, key: &str, value: &str) -> ConfigResult<Self> {
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Self::default()
        };
        config.set_value(key, value)?;
        config.save_to(path)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    /// Copy with every API key reduced to its last four characters.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for backend in config.backends.values_mut() {
            if let Some(key) = backend.api_key.as_mut() {
                *key = mask_secret(key);
            }
        }
        config
    }

    pub fn get_backend_config(&self, backend_name: &str) -> Option<&BackendConfig> {
        self.backends.get(backend_name)
    }

    pub fn set_backend_config(&mut self, backend_name: String, config: BackendConfig) {
        self.backends.insert(backend_name, config);
    }

    pub fn update_backend_setting(
        &mut self,
        backend_name: &str,
        key: &str,
        value: String,
    ) -> ConfigResult<()> {
        if backend_name.is_empty() {
            return Err(ConfigError::UnknownBackend {
                name: backend_name.to_string(),
            });
        }

        let config = self.backends.entry(backend_name.to_string()).or_default();

        match key {
            "api_key" => config.api_key = Some(value),
            "model" => config.model = Some(value),
            "base_url" => config.base_url = Some(value),
            "chat_api" => config.chat_api = Some(value),
            "temperature" => config.temperature = Some(parse_field("temperature", &value)?),
            _ => {
                return Err(ConfigError::UnknownConfigKey {
                    key: key.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Apply one `config set <key> <value>` assignment.
    ///
    /// Accepted keys are `default_backend`, `verbosity`, `context.<field>` and
    /// `<backend>_<setting>` where setting is one of `api_key`, `model`,
    /// `base_url`, `chat_api` or `temperature`.
    pub fn set_value(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        match key {
            "default_backend" => {
                if value != "mock" && !self.backends.contains_key(value) {
                    return Err(ConfigError::UnknownBackend {
                        name: value.to_string(),
                    });
                }
                self.default_backend = value.to_string();
                Ok(())
            }
            "verbosity" => {
                let level =
                    VerbosityLevel::parse(value).ok_or_else(|| ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.to_string(),
                    })?;
                self.set_verbosity(level);
                Ok(())
            }
            _ => {
                if let Some(field) = key.strip_prefix("context.") {
                    return self.set_context_value(field, value);
                }

                for suffix in BACKEND_KEY_SUFFIXES {
                    if let Some(backend) = key
                        .strip_suffix(suffix)
                        .and_then(|rest| rest.strip_suffix('_'))
                    {
                        return self.update_backend_setting(backend, suffix, value.to_string());
                    }
                }

                Err(ConfigError::UnknownConfigKey {
                    key: key.to_string(),
                })
            }
        }
    }

    fn set_context_value(&mut self, field: &str, value: &str) -> ConfigResult<()> {
        let context = &mut self.context;
        match field {
            "max_turns" => context.max_turns = parse_field(field, value)?,
            "max_cost" => context.max_cost = parse_field(field, value)?,
            "keep_recent" => context.keep_recent = parse_field(field, value)?,
            "chars_per_token" => context.chars_per_token = parse_field(field, value)?,
            "warning_threshold" => {
                let threshold: f32 = parse_field(field, value)?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        value: value.to_string(),
                    });
                }
                context.warning_threshold = threshold;
            }
            "summary_timeout_secs" => context.summary_timeout_secs = parse_field(field, value)?,
            "summary_max_retries" => context.summary_max_retries = parse_field(field, value)?,
            "summary_domain" => context.summary_domain = value.to_string(),
            _ => {
                return Err(ConfigError::UnknownConfigKey {
                    key: format!("context.{}", field),
                });
            }
        }
        Ok(())
    }

    /// Get the configured verbosity level, falling back to Normal if not set
    pub fn get_verbosity(&self) -> VerbosityLevel {
        self.verbosity
            .as_deref()
            .and_then(VerbosityLevel::parse)
            .unwrap_or(VerbosityLevel::Normal)
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = Some(verbosity.to_string());
    }

    pub fn config_path() -> ConfigResult<PathBuf> {
        let mut path = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        path.push(".config");
        path.push("shipdash");
        path.push("config.toml");
        Ok(path)
    }
}

fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
