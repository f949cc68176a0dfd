use std::env::VarError;
use std::fmt::Display;
use std::str::FromStr;

use crate::app_config::{
    AppConfig, AzureVisionConfig, ClientConfig, EbayCredentials, Environment,
};
use crate::ConfigError;

const DEFAULT_EBAY_API_BASE_URL: &str = "https://api.ebay.com";
const DEFAULT_EBAY_IDENTITY_BASE_URL: &str = "https://api.ebay.com";
const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-4o";
const DEFAULT_AZURE_API_VERSION: &str = "2024-04-01-preview";
const DEFAULT_PROVIDER_TIMEOUT_SECS: &str = "30";
const DEFAULT_SERVICE_URL: &str = "http://localhost:3001";
const DEFAULT_SHOWCASE_INTERVAL_MS: &str = "3000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("RESNAP_ENV", "development"))?;
    let bind_addr = parse_addr("RESNAP_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("RESNAP_LOG_LEVEL", "info");

    let ebay = match (optional("EBAY_CLIENT_ID"), optional("EBAY_CLIENT_SECRET")) {
        (Some(client_id), Some(client_secret)) => Some(EbayCredentials {
            client_id,
            client_secret,
        }),
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("EBAY_CLIENT_SECRET".into())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("EBAY_CLIENT_ID".into())),
        (None, None) => None,
    };

    let vision = match (
        optional("AZURE_OPENAI_ENDPOINT"),
        optional("AZURE_OPENAI_API_KEY"),
    ) {
        (Some(endpoint), Some(api_key)) => Some(AzureVisionConfig {
            endpoint,
            api_key,
            deployment: or_default("AZURE_OPENAI_DEPLOYMENT", DEFAULT_AZURE_DEPLOYMENT),
            api_version: or_default("AZURE_OPENAI_API_VERSION", DEFAULT_AZURE_API_VERSION),
        }),
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar("AZURE_OPENAI_API_KEY".into()))
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar("AZURE_OPENAI_ENDPOINT".into()))
        }
        (None, None) => None,
    };

    if env == Environment::Production {
        if ebay.is_none() {
            return Err(ConfigError::MissingEnvVar("EBAY_CLIENT_ID".into()));
        }
        if vision.is_none() {
            return Err(ConfigError::MissingEnvVar("AZURE_OPENAI_ENDPOINT".into()));
        }
    }

    let ebay_api_base_url = or_default("EBAY_API_BASE_URL", DEFAULT_EBAY_API_BASE_URL);
    let ebay_identity_base_url =
        or_default("EBAY_IDENTITY_BASE_URL", DEFAULT_EBAY_IDENTITY_BASE_URL);
    let ebay_search_limit: u32 = parse_var(&lookup, "EBAY_SEARCH_LIMIT", "10")?;
    if ebay_search_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "EBAY_SEARCH_LIMIT".into(),
            reason: "must be at least 1".into(),
        });
    }

    let provider_timeout_secs: u64 = parse_var(
        &lookup,
        "RESNAP_PROVIDER_TIMEOUT_SECS",
        DEFAULT_PROVIDER_TIMEOUT_SECS,
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        ebay,
        ebay_api_base_url,
        ebay_identity_base_url,
        ebay_search_limit,
        vision,
        provider_timeout_secs,
    })
}

/// Load the command-line client's configuration, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric setting does not parse or is zero.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_client_config(|key| std::env::var(key))
}

/// Build the client configuration from an env-var lookup.
///
/// Only client-side variables are read; `RESNAP_ENV` and provider
/// credentials play no part, so a production shell without secrets still
/// yields a usable client.
fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let log_level = lookup("RESNAP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let service_url =
        lookup("RESNAP_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
    let provider_timeout_secs: u64 = parse_var(
        &lookup,
        "RESNAP_PROVIDER_TIMEOUT_SECS",
        DEFAULT_PROVIDER_TIMEOUT_SECS,
    )?;
    let showcase_interval_ms: u64 = parse_var(
        &lookup,
        "RESNAP_SHOWCASE_INTERVAL_MS",
        DEFAULT_SHOWCASE_INTERVAL_MS,
    )?;
    if showcase_interval_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RESNAP_SHOWCASE_INTERVAL_MS".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(ClientConfig {
        log_level,
        service_url,
        // A lookup spans the token and search calls upstream.
        request_timeout_secs: provider_timeout_secs.saturating_mul(2),
        showcase_interval_ms,
    })
}

fn parse_var<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Result<String, VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RESNAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
