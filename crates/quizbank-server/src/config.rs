//! Server configuration
//!
//! Defaults overlaid by process environment (`DATABASE_URL`, `BIND_ADDRESS`,
//! `DATABASE_MAX_CONNECTIONS`). A `.env` file is loaded by `main` first.

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quizbank.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
}

/// Storage connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::default().try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default(
                "database_max_connections",
                i64::from(DEFAULT_MAX_CONNECTIONS),
            )?
            .add_source(source)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory database, mostly for tests
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default()
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database_max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ServerConfig::from_source(env(&[
            ("DATABASE_URL", "sqlite:///tmp/quiz.db"),
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite:///tmp/quiz.db");
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.database().max_connections, 2);
        assert!(!config.database().is_in_memory());
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(DatabaseConfig {
            url: "sqlite:file:quiz?mode=memory&cache=shared".to_string(),
            max_connections: 1,
        }
        .is_in_memory());
    }
}
