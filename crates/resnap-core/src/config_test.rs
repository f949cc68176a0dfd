use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with both provider credential sets populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("EBAY_CLIENT_ID", "client-id");
    m.insert("EBAY_CLIENT_SECRET", "client-secret");
    m.insert("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com");
    m.insert("AZURE_OPENAI_API_KEY", "azure-key");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "RESNAP_ENV"));
}

#[test]
fn build_app_config_defaults_without_any_vars() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.port(), 3001);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.ebay.is_none());
    assert!(cfg.vision.is_none());
    assert_eq!(cfg.ebay_api_base_url, "https://api.ebay.com");
    assert_eq!(cfg.ebay_search_limit, 10);
    assert_eq!(cfg.provider_timeout_secs, 30);
}

#[test]
fn build_app_config_reads_provider_credentials() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let ebay = cfg.ebay.as_ref().expect("ebay credentials");
    assert_eq!(ebay.client_id, "client-id");
    assert_eq!(ebay.client_secret, "client-secret");
    let vision = cfg.vision.as_ref().expect("vision config");
    assert_eq!(vision.deployment, "gpt-4o");
    assert_eq!(vision.api_version, "2024-04-01-preview");
}

#[test]
fn build_app_config_rejects_half_configured_ebay() {
    let mut map = HashMap::new();
    map.insert("EBAY_CLIENT_ID", "client-id");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "EBAY_CLIENT_SECRET"),
        "expected MissingEnvVar(EBAY_CLIENT_SECRET), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_half_configured_azure() {
    let mut map = HashMap::new();
    map.insert("AZURE_OPENAI_API_KEY", "azure-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "AZURE_OPENAI_ENDPOINT"),
        "expected MissingEnvVar(AZURE_OPENAI_ENDPOINT), got: {result:?}"
    );
}

#[test]
fn build_app_config_blank_credentials_count_as_missing() {
    let mut map = HashMap::new();
    map.insert("EBAY_CLIENT_ID", "  ");
    map.insert("EBAY_CLIENT_SECRET", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.ebay.is_none());
}

#[test]
fn build_app_config_production_requires_providers() {
    let mut map = HashMap::new();
    map.insert("RESNAP_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "EBAY_CLIENT_ID"),
        "expected MissingEnvVar(EBAY_CLIENT_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_production_succeeds_with_providers() {
    let mut map = full_env();
    map.insert("RESNAP_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("RESNAP_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESNAP_BIND_ADDR"),
        "expected InvalidEnvVar(RESNAP_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_search_limit() {
    let mut map = full_env();
    map.insert("EBAY_SEARCH_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EBAY_SEARCH_LIMIT"),
        "expected InvalidEnvVar(EBAY_SEARCH_LIMIT), got: {result:?}"
    );
}

#[test]
fn build_app_config_provider_timeout_override() {
    let mut map = full_env();
    map.insert("RESNAP_PROVIDER_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.provider_timeout_secs, 5);
}

#[test]
fn build_app_config_provider_timeout_invalid() {
    let mut map = full_env();
    map.insert("RESNAP_PROVIDER_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESNAP_PROVIDER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RESNAP_PROVIDER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("client-secret"));
    assert!(!rendered.contains("azure-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn build_client_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_client_config(lookup_from_map(&map)).expect("defaults should load");
    assert_eq!(cfg.service_url, "http://localhost:3001");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 60);
    assert_eq!(cfg.showcase_interval_ms, 3000);
}

#[test]
fn build_client_config_ignores_server_only_requirements() {
    let mut map = HashMap::new();
    map.insert("RESNAP_ENV", "production");
    map.insert("RESNAP_BIND_ADDR", "not-a-socket-addr");
    map.insert("EBAY_SEARCH_LIMIT", "0");
    map.insert("RESNAP_SERVICE_URL", "https://resnap.example.com");
    assert!(build_app_config(lookup_from_map(&map)).is_err());

    let cfg = build_client_config(lookup_from_map(&map)).expect("client config should load");
    assert_eq!(cfg.service_url, "https://resnap.example.com");
}

#[test]
fn build_client_config_rejects_zero_showcase_interval() {
    let mut map = HashMap::new();
    map.insert("RESNAP_SHOWCASE_INTERVAL_MS", "0");
    let result = build_client_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESNAP_SHOWCASE_INTERVAL_MS"),
        "expected InvalidEnvVar(RESNAP_SHOWCASE_INTERVAL_MS), got: {result:?}"
    );
}
