//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::params::{default_params_path, DEFAULT_PARAMS_PATH};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Preprocessing parameter document
    pub params_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),

            params_path: default_params_path(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            params_path: PathBuf::from(DEFAULT_PARAMS_PATH),
            environment: "development".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
