use super::*;

fn complete_config() -> Config {
    let mut config = Config::default();
    config.azure.api_key = Some("key".to_string());
    config.azure.endpoint = Some("https://example.openai.azure.com".to_string());
    config.azure.deployment = Some("revisor-gpt4o".to_string());
    config.auth.token_id = Some("secret".to_string());
    config
}

#[test]
fn test_validate_complete_config() {
    let result = ConfigValidator::validate(&complete_config());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_default_config_only_warns() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    let paths: Vec<_> = result.warnings.iter().map(|w| w.path.as_str()).collect();
    assert!(paths.contains(&"azure.endpoint"));
    assert!(paths.contains(&"azure.api_key"));
    assert!(paths.contains(&"azure.deployment"));
    assert!(paths.contains(&"auth.token_id"));
}

#[test]
fn test_validate_invalid_port() {
    let mut config = complete_config();
    config.server.port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "server.port"));
}

#[test]
fn test_validate_empty_host() {
    let mut config = complete_config();
    config.server.host = String::new();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "server.host"));
}

#[test]
fn test_validate_invalid_endpoint() {
    let mut config = complete_config();
    config.azure.endpoint = Some("example.openai.azure.com".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "azure.endpoint"));
}

#[test]
fn test_validate_empty_api_version() {
    let mut config = complete_config();
    config.azure.api_version = " ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "azure.api_version"));
}

#[test]
fn test_validate_zero_timeouts() {
    let mut config = complete_config();
    config.azure.timeout_seconds = 0;
    config.azure.connect_timeout_seconds = 0;

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_empty_system_prompt() {
    let mut config = complete_config();
    config.reviewer.system_prompt = String::new();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "reviewer.system_prompt"));
}

#[test]
fn test_validate_temperature_range() {
    let mut config = complete_config();
    config.reviewer.temperature = Some(2.5);
    assert!(!ConfigValidator::validate(&config).is_valid());

    config.reviewer.temperature = Some(0.7);
    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_zero_max_tokens() {
    let mut config = complete_config();
    config.reviewer.max_tokens = Some(0);

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "reviewer.max_tokens"));
}

#[test]
fn test_validation_messages_display() {
    let err = ValidationError::new("server.port", "Port cannot be 0");
    assert_eq!(err.to_string(), "server.port: Port cannot be 0");
    let warn = ValidationWarning::new("auth.token_id", "unset");
    assert_eq!(warn.to_string(), "auth.token_id: unset");
}
