//! API configuration

use core_kernel::CoreError;
use serde::Deserialize;

/// API configuration
///
/// Loaded from `API_`-prefixed environment variables, e.g. `API_PORT=9000`
/// or `API_COOKIE_NAME=session`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Path prefix every route is mounted under, empty for none
    pub base_path: String,
    /// Name of the session cookie issued at login
    pub cookie_name: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/concerts".to_string(),
            log_level: "info".to_string(),
            base_path: "/concert-service".to_string(),
            cookie_name: "auth".to_string(),
            max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment, falling back to defaults for
    /// unset keys
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("base_path", defaults.base_path)?
            .set_default("cookie_name", defaults.cookie_name)?
            .set_default("max_connections", defaults.max_connections)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Checks values the router and pool depend on
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.base_path.is_empty()
            && (!self.base_path.starts_with('/') || self.base_path.ends_with('/'))
        {
            return Err(CoreError::configuration(format!(
                "base_path '{}' must start with '/' and not end with '/'",
                self.base_path
            )));
        }
        if self.cookie_name.trim().is_empty() {
            return Err(CoreError::configuration("cookie_name must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::configuration("max_connections must be positive"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
