use std::{env, net::SocketAddr, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sql_logging: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
            sql_logging: parse_or(&lookup, "DB_SQL_LOGGING", false)?,
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "APP_PORT", 8080)?,
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
            database,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = format!("{}:{}", self.host, self.port);
        value.parse().map_err(|_| ConfigError::Invalid {
            name: "APP_HOST",
            value,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn applies_defaults() {
        let config = config_from(&[("DATABASE_URL", "mysql://localhost/users")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert!(!config.database.sql_logging);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "mysql://db/users"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "3000"),
            ("LOG_FORMAT", "JSON"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_SQL_LOGGING", "true"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.database.max_connections, 20);
        assert!(config.database.sql_logging);
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(
            config_from(&[]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = config_from(&[("DATABASE_URL", "mysql://db"), ("APP_PORT", "eighty")])
            .unwrap_err();
        assert_eq!(err.to_string(), "APP_PORT has an invalid value: eighty");

        let err = config_from(&[("DATABASE_URL", "mysql://db"), ("LOG_FORMAT", "xml")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "LOG_FORMAT", .. }));
    }
}
