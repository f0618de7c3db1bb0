//! Unit tests for ServerConfig loading

use prdcase_llm::ProviderKind;
use prdcase_server::config::ServerConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("server.toml"),
        r#"
port = 8088
access_password = "team-secret"
max_document_bytes = 1024

[rate_limit]
max_requests = 3

[llm]
gemini_api_key = "g-key"
gemini_model = "gemini-1.5-flash"
"#,
    )
    .unwrap();

    let config = ServerConfig::load_from(dir.path().join("server")).unwrap();

    assert_eq!(config.port, 8088);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.access_password.as_deref(), Some("team-secret"));
    assert_eq!(config.max_document_bytes, 1024);
    assert_eq!(config.rate_limit.max_requests, 3);
    assert_eq!(config.rate_limit.window_secs, 3600);
    assert_eq!(config.llm.provider_kind(), ProviderKind::Gemini);
    assert_eq!(config.llm.model(), "gemini-1.5-flash");
    assert_eq!(config.llm.ollama_host, "http://localhost:11434");
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig::load_from(dir.path().join("absent")).unwrap();

    assert_eq!(config.port, ServerConfig::default().port);
    assert_eq!(config.llm.temperature, 0.2);
    assert_eq!(config.llm.max_tokens, 4000);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("server.toml"), "port = \"not a number\"\n").unwrap();

    assert!(ServerConfig::load_from(dir.path().join("server")).is_err());
}

#[test]
fn test_config_serializes_round_trip() {
    let config = ServerConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: ServerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}
