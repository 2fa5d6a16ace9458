//! Transport-agnostic server host
//!
//! The host holds the services built from one [`ServiceConfig`] and is the
//! state shared by every HTTP handler.

use crate::config::ServiceConfig;
use crate::core::clock::Clock;
use crate::core::guard::UpdateGuard;
use crate::core::service::{ClientService, OrderService};
use crate::core::store::RecordStore;
use std::sync::Arc;

/// Services and configuration behind the exposed API
#[derive(Clone)]
pub struct ServerHost {
    /// Configuration the services were built from
    pub config: Arc<ServiceConfig>,

    pub orders: OrderService,

    pub clients: ClientService,
}

impl ServerHost {
    /// Wire the services on top of `store`
    ///
    /// `clock` drives the update guard. Use the same clock the store stamps
    /// `last_update` with, or the cooldown is measured against the wrong time.
    pub fn from_components(
        config: ServiceConfig,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let guard = UpdateGuard::new(config.update_cooldown(), clock);
        let orders = OrderService::new(store.clone(), guard);
        let clients = ClientService::new(store, config.clients.delete_policy);

        Self {
            config: Arc::new(config),
            orders,
            clients,
        }
    }

    /// Cooldown the order update guard enforces
    pub fn update_cooldown(&self) -> chrono::Duration {
        self.orders.guard().cooldown()
    }
}
