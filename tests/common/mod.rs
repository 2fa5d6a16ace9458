//! Shared harness for the integration tests
//!
//! Every harness owns one `ManualClock` that both the store and the update
//! guard read, so cooldown windows are driven without sleeping.

#![allow(dead_code)]

use order_desk::prelude::*;
use rust_decimal_macros::dec;

pub struct Harness {
    pub clock: ManualClock,
    pub store: Arc<InMemoryStore>,
    pub host: ServerHost,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        let clock = ManualClock::default();
        let store = Arc::new(InMemoryStore::with_clock(Arc::new(clock.clone())));
        let host = ServerHost::from_components(config, store.clone(), Arc::new(clock.clone()));
        Self { clock, store, host }
    }

    pub fn orders(&self) -> &OrderService {
        &self.host.orders
    }

    pub fn clients(&self) -> &ClientService {
        &self.host.clients
    }

    /// Let the cooldown of every order written so far run out
    pub fn wait_out_cooldown(&self) {
        self.clock.advance(self.host.update_cooldown());
    }

    pub async fn client(&self, name: &str) -> Client {
        self.clients().create(Client::new(name)).await.unwrap()
    }

    pub async fn order(&self, product: &str, cost: Decimal, client_id: EntityId) -> Order {
        self.orders()
            .create(Order::new(product, cost, client_id))
            .await
            .unwrap()
    }

    /// One client "Acme" with orders Widget (10), Gadget (20) and Widget Pro (30)
    pub async fn seeded(&self) -> (Client, Vec<Order>) {
        let client = self.client("Acme").await;
        let mut orders = Vec::new();
        for (product, cost) in [("Widget", dec!(10)), ("Gadget", dec!(20)), ("Widget Pro", dec!(30))] {
            orders.push(self.order(product, cost, client.id).await);
        }
        (client, orders)
    }
}
