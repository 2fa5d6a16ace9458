//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::ServiceConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::store::RecordStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ServiceConfig::from_yaml_file("order-desk.yaml")?)
///     .with_store(InMemoryStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServiceConfig,
    store: Option<Arc<dyn RecordStore>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            store: None,
            clock: None,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the record store (required)
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared record store (required unless `with_store` is used)
    pub fn with_shared_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the clock the update guard reads
    ///
    /// Defaults to the system clock. Must match the clock of the store.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        self.config.validate()?;

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("RecordStore is required. Call .with_store()"))?;
        let clock = self.clock.take().unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServerHost::from_components(self.config, store, clock))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(RestExposure::build_router(host))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured `server.host` and `server.port`, then serves
    /// until SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_build_host_requires_store() {
        let err = ServerBuilder::new().build_host().err().unwrap();
        assert!(err.to_string().contains("RecordStore is required"));
    }

    #[test]
    fn test_build_host_rejects_invalid_config() {
        let mut config = ServiceConfig::default();
        config.server.port = 0;

        let result = ServerBuilder::new()
            .with_config(config)
            .with_store(InMemoryStore::new())
            .build_host();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_host_uses_config() {
        let mut config = ServiceConfig::default();
        config.orders.update_cooldown_secs = 1;

        let host = ServerBuilder::default()
            .with_config(config)
            .with_store(InMemoryStore::new())
            .build_host()
            .unwrap();
        assert_eq!(host.update_cooldown(), chrono::Duration::seconds(1));
    }

    #[test]
    fn test_build_router() {
        let result = ServerBuilder::new().with_store(InMemoryStore::new()).build();
        assert!(result.is_ok());
    }
}
