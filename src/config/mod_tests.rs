// Unit tests for the config module
// Tests focus on defaults, `config set` key handling and TOML round-trips

use super::*;
use tempfile::TempDir;

#[test]
fn default_config_has_required_fields() {
    let config = AppConfig::default();

    assert_eq!(config.default_backend, "mock");
    assert!(config.backends.is_empty());
    assert!(config.verbosity.is_none());
    assert_eq!(config.context, CompactionConfig::default());
}

#[test]
fn empty_file_parses_to_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn partial_context_table_keeps_other_defaults() {
    let config: AppConfig = toml::from_str(
        r#"
default_backend = "mock"

[context]
max_turns = 12
summary_domain = "freight audit"
"#,
    )
    .unwrap();

    assert_eq!(config.context.max_turns, 12);
    assert_eq!(config.context.summary_domain, "freight audit");
    assert_eq!(config.context.max_cost, 4_000);
    assert_eq!(config.context.keep_recent, 4);
}

#[test]
fn invalid_toml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "default_backend = [").unwrap();

    let result = AppConfig::load_from(&path);

    assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
}

#[test]
fn save_and_load_round_trip_preserves_context() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.context = config.context.with_max_cost(9_000).with_keep_recent(6);
    config.set_value("openai_model", "gpt-4o").unwrap();
    config.set_value("verbosity", "verbose").unwrap();
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.context.max_cost, 9_000);
    assert_eq!(loaded.context.keep_recent, 6);
}

#[test]
fn get_backend_config_returns_none_when_not_found() {
    let config = AppConfig::default();

    assert!(config.get_backend_config("nonexistent").is_none());
}

#[test]
fn set_backend_config_adds_new_backend() {
    let mut config = AppConfig::default();
    let backend = BackendConfig {
        api_key: Some("new-key".to_string()),
        model: Some("model-1".to_string()),
        ..Default::default()
    };

    config.set_backend_config("groq".to_string(), backend);

    assert_eq!(
        config.get_backend_config("groq").unwrap().api_key,
        Some("new-key".to_string())
    );
}

#[test]
fn update_backend_setting_creates_backend_if_not_exists() {
    let mut config = AppConfig::default();

    config
        .update_backend_setting("openai", "api_key", "test-key".to_string())
        .unwrap();

    assert_eq!(
        config.get_backend_config("openai").unwrap().api_key,
        Some("test-key".to_string())
    );
}

#[test]
fn update_backend_setting_rejects_bad_temperature() {
    let mut config = AppConfig::default();

    let result = config.update_backend_setting("openai", "temperature", "warm".to_string());

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn set_value_routes_backend_suffixes() {
    let mut config = AppConfig::default();

    config.set_value("openai_api_key", "sk-test").unwrap();
    config.set_value("openai_chat_api", "/v1/chat").unwrap();
    config.set_value("local_llm_base_url", "http://localhost:8080").unwrap();
    config.set_value("local_llm_temperature", "0.2").unwrap();

    let openai = config.get_backend_config("openai").unwrap();
    assert_eq!(openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(openai.chat_api.as_deref(), Some("/v1/chat"));

    let local = config.get_backend_config("local_llm").unwrap();
    assert_eq!(local.base_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(local.temperature, Some(0.2));
}

#[test]
fn set_value_updates_context_fields() {
    let mut config = AppConfig::default();

    config.set_value("context.max_turns", "20").unwrap();
    config.set_value("context.warning_threshold", "0.5").unwrap();
    config.set_value("context.summary_timeout_secs", "5").unwrap();

    assert_eq!(config.context.max_turns, 20);
    assert_eq!(config.context.warning_threshold, 0.5);
    assert_eq!(config.context.summary_timeout_secs, 5);
}

#[test]
fn set_value_rejects_out_of_range_threshold() {
    let mut config = AppConfig::default();

    let result = config.set_value("context.warning_threshold", "1.5");

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    assert_eq!(config.context.warning_threshold, 0.70);
}

#[test]
fn set_value_rejects_unknown_keys() {
    let mut config = AppConfig::default();

    assert!(matches!(
        config.set_value("context.window", "3"),
        Err(ConfigError::UnknownConfigKey { .. })
    ));
    assert!(matches!(
        config.set_value("colour", "blue"),
        Err(ConfigError::UnknownConfigKey { .. })
    ));
}

#[test]
fn default_backend_must_be_known() {
    let mut config = AppConfig::default();

    assert!(matches!(
        config.set_value("default_backend", "openai"),
        Err(ConfigError::UnknownBackend { .. })
    ));

    config.set_value("openai_api_key", "sk-test").unwrap();
    config.set_value("default_backend", "openai").unwrap();
    assert_eq!(config.default_backend, "openai");
}

#[test]
fn verbosity_falls_back_to_normal() {
    let mut config = AppConfig::default();
    assert_eq!(config.get_verbosity(), VerbosityLevel::Normal);

    config.verbosity = Some("chatty".to_string());
    assert_eq!(config.get_verbosity(), VerbosityLevel::Normal);

    assert!(config.set_value("verbosity", "chatty").is_err());
    config.set_value("verbosity", "debug").unwrap();
    assert_eq!(config.get_verbosity(), VerbosityLevel::Debug);
}

#[test]
fn set_in_file_leaves_malformed_config_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let original = r#"default_backend = "groq"

[backends.groq]
api_key = "gsk-live-secret"

[context]
max_turns = 20

[broken
"#;
    fs::write(&path, original).unwrap();

    let result = AppConfig::set_in_file(&path, "verbosity", "debug");

    assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn set_in_file_keeps_existing_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[backends.groq]\napi_key = \"gsk-live-secret\"\n\n[context]\nmax_turns = 20\n",
    )
    .unwrap();

    AppConfig::set_in_file(&path, "verbosity", "debug").unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.get_verbosity(), VerbosityLevel::Debug);
    assert_eq!(loaded.context.max_turns, 20);
    assert_eq!(
        loaded.get_backend_config("groq").unwrap().api_key.as_deref(),
        Some("gsk-live-secret")
    );
}

#[test]
fn set_in_file_creates_missing_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shipdash").join("config.toml");

    let config = AppConfig::set_in_file(&path, "context.keep_recent", "6").unwrap();

    assert_eq!(config.context.keep_recent, 6);
    assert_eq!(AppConfig::load_from(&path).unwrap(), config);
}

#[test]
fn set_in_file_rejected_value_does_not_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[context]\nmax_turns = 20\n").unwrap();

    let result = AppConfig::set_in_file(&path, "context.max_turns", "lots");

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[context]\nmax_turns = 20\n"
    );
}

#[test]
fn redacted_masks_api_keys() {
    let mut config = AppConfig::default();
    config.set_value("openai_api_key", "sk-proj-abcd1234").unwrap();
    config.set_value("groq_api_key", "abc").unwrap();
    config.set_value("groq_model", "llama-3").unwrap();

    let redacted = config.redacted();
    let rendered = redacted.to_toml().unwrap();

    assert_eq!(
        redacted.get_backend_config("openai").unwrap().api_key.as_deref(),
        Some("****1234")
    );
    assert_eq!(
        redacted.get_backend_config("groq").unwrap().api_key.as_deref(),
        Some("****")
    );
    assert_eq!(
        redacted.get_backend_config("groq").unwrap().model.as_deref(),
        Some("llama-3")
    );
    assert!(!rendered.contains("sk-proj-abcd1234"));
    assert_eq!(
        config.get_backend_config("openai").unwrap().api_key.as_deref(),
        Some("sk-proj-abcd1234")
    );
}
