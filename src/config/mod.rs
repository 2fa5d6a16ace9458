//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::Result;
use axum::http::HeaderValue;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// What happens to the orders of a client that gets deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientDeletePolicy {
    /// Refuse to delete a client that still owns orders
    #[default]
    Reject,
    /// Delete the client's orders together with the client
    Cascade,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; `*` allows any origin, empty disables CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

/// Order settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Minimum time between two successful writes of the same order
    pub update_cooldown_secs: u64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            update_cooldown_secs: 5,
        }
    }
}

/// Client settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub delete_policy: ClientDeletePolicy,
}

/// Complete service configuration
///
/// # Example
///
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 8080
///   cors_origins: ["https://desk.example.com"]
/// orders:
///   update_cooldown_secs: 5
/// clients:
///   delete_policy: cascade
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub orders: OrderConfig,
    pub clients: ClientConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: "0".to_string(),
                message: "port must be between 1 and 65535".to_string(),
            });
        }
        if Duration::try_seconds(self.cooldown_secs_signed()).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "orders.update_cooldown_secs".to_string(),
                value: self.orders.update_cooldown_secs.to_string(),
                message: "cooldown is out of range".to_string(),
            });
        }
        for origin in &self.server.cors_origins {
            if origin != "*" && HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "server.cors_origins".to_string(),
                    value: origin.clone(),
                    message: "not a valid origin header value".to_string(),
                });
            }
        }
        self.socket_addr().map(|_| ())
    }

    /// Cooldown enforced by the update guard
    pub fn update_cooldown(&self) -> Duration {
        Duration::try_seconds(self.cooldown_secs_signed()).unwrap_or(Duration::MAX)
    }

    fn cooldown_secs_signed(&self) -> i64 {
        i64::try_from(self.orders.update_cooldown_secs).unwrap_or(i64::MAX)
    }

    /// Address the HTTP server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                message: e.to_string(),
            })
    }
}
