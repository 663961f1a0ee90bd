use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
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
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("POSTCRAFT_ENV", "development"))?;

    let log_level = or_default("POSTCRAFT_LOG_LEVEL", "info");
    let briefing_path = PathBuf::from(or_default(
        "POSTCRAFT_BRIEFING_PATH",
        "./config/briefing.yaml",
    ));

    let max_batch_size = parse_positive_usize("POSTCRAFT_MAX_BATCH_SIZE", "20")?;
    let max_concurrent_generations =
        parse_positive_usize("POSTCRAFT_MAX_CONCURRENT_GENERATIONS", "1")?;

    let llm_timeout_secs = parse_u64("POSTCRAFT_LLM_TIMEOUT_SECS", "30")?;
    let llm_max_tokens = parse_u32("POSTCRAFT_LLM_MAX_TOKENS", "500")?;
    let llm_base_url = or_default("POSTCRAFT_LLM_BASE_URL", "https://api.openai.com/v1");
    let llm_model = or_default("POSTCRAFT_LLM_MODEL", "gpt-4o-mini");
    let llm_api_key = lookup("POSTCRAFT_LLM_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    Ok(AppConfig {
        env,
        log_level,
        briefing_path,
        max_batch_size,
        max_concurrent_generations,
        llm_timeout_secs,
        llm_max_tokens,
        llm_base_url,
        llm_model,
        llm_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POSTCRAFT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
