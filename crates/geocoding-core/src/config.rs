use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_LANGUAGE: &str = "en-GB";
pub const DEFAULT_COUNTRY_NAME_LANGUAGE: &str = "en";
pub const DEFAULT_USER_AGENT: &str = "geocoding-client/0.1";

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
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_key = require("GEOCODING_API_KEY")?;
    let env = parse_environment(&or_default("GEOCODING_ENV", "development"))?;

    let base_url = or_default("GEOCODING_BASE_URL", DEFAULT_BASE_URL);
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOCODING_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{base_url}'"),
        });
    }

    let language = or_default("GEOCODING_LANGUAGE", DEFAULT_LANGUAGE);
    let country_name_language = or_default(
        "GEOCODING_COUNTRY_NAME_LANGUAGE",
        DEFAULT_COUNTRY_NAME_LANGUAGE,
    );

    let request_timeout_secs = parse_u64("GEOCODING_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOCODING_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("GEOCODING_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("GEOCODING_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_key,
        env,
        base_url,
        language,
        country_name_language,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GEOCODING_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
