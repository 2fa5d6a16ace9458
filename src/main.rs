//! Order desk server binary
//!
//! Reads its configuration from the YAML file named by `ORDER_DESK_CONFIG`,
//! or runs with defaults when the variable is unset.

use anyhow::{Context, Result};
use order_desk::config::ServiceConfig;
use order_desk::server::ServerBuilder;
use order_desk::storage::InMemoryStore;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "ORDER_DESK_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_desk=debug")),
        )
        .init();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            ServiceConfig::from_yaml_file(&path)
                .with_context(|| format!("failed to load configuration from {path}"))?
        }
        Err(_) => {
            tracing::info!("{} not set, using default configuration", CONFIG_ENV);
            ServiceConfig::default()
        }
    };

    tracing::info!(
        cooldown_secs = config.orders.update_cooldown_secs,
        delete_policy = ?config.clients.delete_policy,
        "Starting order desk"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_store(InMemoryStore::new())
        .serve()
        .await
}
