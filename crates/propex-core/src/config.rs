use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup.
///
/// The parsing/validation core is decoupled from the real environment so
/// tests can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let database_url = require("DATABASE_URL")?;
    let renderer_url = require("PROPEX_RENDERER_URL")?;
    let renderer_token = lookup("PROPEX_RENDERER_TOKEN").ok();

    let env = parse_environment(&or_default("PROPEX_ENV", "development"));
    let bind_addr = parse_addr("PROPEX_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PROPEX_LOG_LEVEL", "info");

    // Listing portals are slow to go network-idle; the nav ceiling plus the
    // post-idle settle delay bound one render end to end.
    let render_nav_timeout_secs = parse_u64("PROPEX_RENDER_NAV_TIMEOUT_SECS", "45")?;
    let render_settle_ms = parse_u64("PROPEX_RENDER_SETTLE_MS", "1500")?;
    let render_user_agent = or_default(
        "PROPEX_RENDER_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    );

    let db_max_connections = parse_u32("PROPEX_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("PROPEX_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PROPEX_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        renderer_url,
        renderer_token,
        render_nav_timeout_secs,
        render_settle_ms,
        render_user_agent,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| map.get(key).map(|v| (*v).to_string()).ok_or(VarError::NotPresent)
    }

    fn minimal_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/propex"),
            ("PROPEX_RENDERER_URL", "http://localhost:3030"),
        ])
    }

    #[test]
    fn builds_with_defaults_from_minimal_env() {
        let env = minimal_env();
        let config = build_app_config(lookup_from(&env)).unwrap();

        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.render_nav_timeout_secs, 45);
        assert_eq!(config.render_settle_ms, 1500);
        assert!(config.renderer_token.is_none());
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let env = HashMap::from([("PROPEX_RENDERER_URL", "http://localhost:3030")]);
        let err = build_app_config(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(var) if var == "DATABASE_URL"));
    }

    #[test]
    fn missing_renderer_url_is_an_error() {
        let env = HashMap::from([("DATABASE_URL", "postgres://localhost/propex")]);
        let err = build_app_config(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(var) if var == "PROPEX_RENDERER_URL"));
    }

    #[test]
    fn invalid_bind_addr_is_an_error() {
        let mut env = minimal_env();
        env.insert("PROPEX_BIND_ADDR", "not-an-addr");
        let err = build_app_config(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { var, .. } if var == "PROPEX_BIND_ADDR"));
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        let mut env = minimal_env();
        env.insert("PROPEX_RENDER_NAV_TIMEOUT_SECS", "soon");
        let err = build_app_config(lookup_from(&env)).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar { var, .. } if var == "PROPEX_RENDER_NAV_TIMEOUT_SECS")
        );
    }

    #[test]
    fn environment_parses_known_values_and_defaults_otherwise() {
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut env = minimal_env();
        env.insert("PROPEX_RENDERER_TOKEN", "s3cret");
        let config = build_app_config(lookup_from(&env)).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("postgres://"));
    }
}
