use crate::app_config::{AppConfig, Environment, DEFAULT_ALLOWED_HOSTS, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("CLIPSTRIP_ENV", "development"))?;

    let bind_addr = or_default("CLIPSTRIP_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CLIPSTRIP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CLIPSTRIP_LOG_LEVEL", "info");
    let fetch_timeout_secs = parse_positive_u64("CLIPSTRIP_FETCH_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("CLIPSTRIP_USER_AGENT", DEFAULT_USER_AGENT);
    let allowed_hosts =
        parse_allowed_hosts(&or_default("CLIPSTRIP_ALLOWED_HOSTS", DEFAULT_ALLOWED_HOSTS))?;
    let rate_limit_per_minute =
        usize::try_from(parse_positive_u64("CLIPSTRIP_RATE_LIMIT_PER_MINUTE", "60")?)
            .map_err(|e| invalid("CLIPSTRIP_RATE_LIMIT_PER_MINUTE", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fetch_timeout_secs,
        user_agent,
        allowed_hosts,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CLIPSTRIP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Parse the outbound host allow-list.
///
/// `*` disables the restriction and yields `None`. Entries are trimmed,
/// lowercased and stripped of a leading `.`; empty entries are skipped.
fn parse_allowed_hosts(raw: &str) -> Result<Option<Vec<String>>, ConfigError> {
    if raw.trim() == "*" {
        return Ok(None);
    }

    let hosts: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if hosts.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CLIPSTRIP_ALLOWED_HOSTS".to_string(),
            reason: "expected a comma-separated host list or \"*\"".to_string(),
        });
    }

    Ok(Some(hosts))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
