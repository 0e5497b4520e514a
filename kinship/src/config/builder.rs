//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use std::path::{Path, PathBuf};

use super::{Result, models::*, validation};
use crate::storage::config::{SurrealDBConfig, SurrealDBEngine};

/// Builder for creating KinshipConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: KinshipConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: KinshipConfig::default(),
        }
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Use default storage configuration (persistent embedded SurrealDB)
    pub fn with_default_storage(mut self) -> Self {
        if self.config.storage.data_dir == PathBuf::from("./data") {
            let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            self.config.storage.data_dir = home_dir.join(".kinship").join("data");
        }

        self.config.storage.surrealdb = SurrealDBConfig {
            engine: SurrealDBEngine::RocksDB,
            connection: self
                .config
                .storage
                .data_dir
                .join("registry")
                .to_string_lossy()
                .to_string(),
            namespace: "kinship".to_string(),
            database: "main".to_string(),
            auth: None,
        };

        self
    }

    /// Use in-memory storage (good for testing)
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.surrealdb.engine = SurrealDBEngine::Memory;
        self.config.storage.surrealdb.connection = "memory".to_string();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (JSON output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;

        self
    }

    /// Create a configuration for development with an in-memory database.
    pub fn development() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for automated testing.
    pub fn testing() -> Self {
        Self::development().with_data_dir(PathBuf::from("./test_data"))
    }

    /// Create a production-ready configuration with persistent storage.
    pub fn production() -> Self {
        Self::new().with_default_storage().with_default_logging()
    }

    /// Create a fully default configuration suitable for most uses
    ///
    /// This is equivalent to `production()`, with remote SurrealDB picked up
    /// from the environment when configured.
    pub fn defaults() -> Self {
        Self::production().with_remote_surrealdb_if_configured()
    }

    /// Configure SurrealDB to use a remote connection if environment variables are set
    pub fn with_remote_surrealdb_if_configured(mut self) -> Self {
        if let Ok(connection_url) = std::env::var("SURREALDB_URL") {
            tracing::info!(
                "Configuring SurrealDB remote connection to: {}",
                connection_url
            );

            let engine =
                if connection_url.starts_with("ws://") || connection_url.starts_with("wss://") {
                    SurrealDBEngine::WebSocket
                } else {
                    SurrealDBEngine::Http
                };

            let namespace =
                std::env::var("SURREALDB_NAMESPACE").unwrap_or_else(|_| "kinship".to_string());
            let database =
                std::env::var("SURREALDB_DATABASE").unwrap_or_else(|_| "main".to_string());

            let auth = if let (Ok(username), Ok(password)) = (
                std::env::var("SURREALDB_USERNAME"),
                std::env::var("SURREALDB_PASSWORD"),
            ) {
                Some(crate::storage::config::SurrealDBAuth { username, password })
            } else {
                None
            };

            self.config.storage.surrealdb = SurrealDBConfig {
                engine,
                connection: connection_url,
                namespace,
                database,
                auth,
            };
        }

        self
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<KinshipConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
