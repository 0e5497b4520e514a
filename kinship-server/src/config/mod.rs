//! Server configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Enable authentication
    pub enable_auth: bool,

    /// JWT secret key for verifying tokens
    pub jwt_secret: String,

    /// JWT token expiration time in hours
    pub jwt_expiration_hours: u64,

    /// Path to the registry config file
    pub config_file_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            max_request_size: 16 * 1024 * 1024, // 16MB
            enable_auth: true,
            jwt_secret: "".to_string(), // Generated at runtime if not provided
            jwt_expiration_hours: 24,
            config_file_path: PathBuf::from("config.json"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("KINSHIP_PORT") {
            config.port = port.parse()?;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("KINSHIP_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        if let Some(enable_auth) = cli_args.enable_auth {
            config.enable_auth = enable_auth;
        } else if let Ok(enable_auth) = env::var("KINSHIP_ENABLE_AUTH") {
            config.enable_auth = enable_auth.parse().unwrap_or(true);
        }

        if let Some(jwt_secret) = cli_args.jwt_secret {
            config.jwt_secret = jwt_secret;
        } else if let Ok(jwt_secret) = env::var("KINSHIP_JWT_SECRET") {
            config.jwt_secret = jwt_secret;
        } else if config.jwt_secret.is_empty() {
            config.jwt_secret = Self::generate_jwt_secret();
        }

        if let Some(exp_hours) = cli_args.jwt_expiration_hours {
            config.jwt_expiration_hours = exp_hours;
        } else if let Ok(exp_hours) = env::var("KINSHIP_JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = exp_hours.parse()?;
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file_path = config_path;
        } else if let Ok(config_path) = env::var("KINSHIP_CONFIG_FILE") {
            config.config_file_path = PathBuf::from(config_path);
        }

        Ok(config)
    }

    /// Generate a secure random JWT secret
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;
        use rand::distr::Alphanumeric;
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }
}
