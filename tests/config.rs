use serial_test::serial;
use travelbot::ai::config::AiConfig;
use travelbot::Config;

fn clear_ai_env() {
    for var in [
        "GEMINI_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_API_URL",
        "REMOTE_CONFIG_URL",
        "REMOTE_CONFIG_FETCH_INTERVAL_SECS",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn ai_config_from_env_missing_key() {
    clear_ai_env();
    assert!(AiConfig::from_env().is_none());
}

#[test]
#[serial]
fn ai_config_from_env_defaults() {
    clear_ai_env();
    std::env::set_var("GEMINI_API_KEY", "k");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("k"));
    assert_eq!(cfg.model, "gemini-2.0-flash-exp");
    assert_eq!(cfg.api_url, "https://generativelanguage.googleapis.com");
    assert_eq!(cfg.remote_config_url, None);
    assert_eq!(cfg.fetch_interval_secs, 3600);
}

#[test]
#[serial]
fn ai_config_from_env_remote_only() {
    clear_ai_env();
    std::env::set_var("REMOTE_CONFIG_URL", "http://flags.local/config.json");
    std::env::set_var("REMOTE_CONFIG_FETCH_INTERVAL_SECS", "60");
    std::env::set_var("GEMINI_MODEL", "gemini-1.5-flash");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, None);
    assert_eq!(
        cfg.remote_config_url.as_deref(),
        Some("http://flags.local/config.json")
    );
    assert_eq!(cfg.fetch_interval_secs, 60);
    assert_eq!(cfg.model, "gemini-1.5-flash");
    clear_ai_env();
}

#[tokio::test]
#[serial]
async fn static_key_source_from_env() {
    clear_ai_env();
    std::env::set_var("GEMINI_API_KEY", "k");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.key_source().fetch_api_key().await.unwrap(), "k");
    clear_ai_env();
}

#[test]
#[serial]
fn config_from_env_calls_ai_constructor() {
    clear_ai_env();
    std::env::set_var("DB_URL", "sqlite:test.db");
    std::env::set_var("GEMINI_API_KEY", "k");
    let cfg = Config::from_env();
    assert_eq!(cfg.db_url, "sqlite:test.db");
    assert_eq!(cfg.ai.unwrap().api_key.as_deref(), Some("k"));
    std::env::remove_var("DB_URL");
    clear_ai_env();
}
