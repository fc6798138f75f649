// Application configuration loaded from environment variables

use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime settings for the server
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Symmetric HS256 signing key
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub token_ttl_minutes: i64,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Reads the configuration from the process environment
    /// Call `dotenv::dotenv()` first to pick up a `.env` file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} bytes long", MIN_JWT_SECRET_LEN),
            });
        }

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;

        let token_ttl_minutes = parse_or(
            "JWT_EXPIRATION_MINUTES",
            lookup("JWT_EXPIRATION_MINUTES"),
            DEFAULT_TOKEN_TTL_MINUTES,
        )?;
        if token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_MINUTES",
                reason: "must be greater than zero".to_string(),
            });
        }

        let db_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_DB_MAX_CONNECTIONS,
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_minutes,
            db_max_connections,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: format!("{:?}: {}", value, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "F7AE3E05-DA6F-4C1E-AE7F-B817669B56FD";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/catalog"),
            ("JWT_SECRET", SECRET),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_minutes, 10);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/catalog"),
            ("JWT_SECRET", SECRET),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("JWT_EXPIRATION_MINUTES", "30"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.token_ttl_minutes, 30);
        assert_eq!(config.db_max_connections, 12);
    }

    #[test]
    fn test_missing_required_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));

        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgresql://x")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("JWT_SECRET", "short"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "JWT_SECRET", .. }));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("JWT_SECRET", SECRET),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://x"),
            ("JWT_SECRET", SECRET),
            ("JWT_EXPIRATION_MINUTES", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "JWT_EXPIRATION_MINUTES", .. }));
    }
}
