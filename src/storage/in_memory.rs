//! In-memory implementation of RecordStore for testing and development

use crate::core::clock::{Clock, SystemClock};
use crate::core::entity::{Entity, EntityId};
use crate::core::error::{EntityError, ServiceResult, StorageError};
use crate::core::query::PageRequest;
use crate::core::specification::Specification;
use crate::core::store::RecordStore;
use crate::entities::{Client, Order};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    clients: BTreeMap<EntityId, Client>,
    orders: BTreeMap<EntityId, Order>,
    next_client_id: EntityId,
    next_order_id: EntityId,
}

impl Tables {
    fn allocate_client_id(&mut self) -> EntityId {
        self.next_client_id += 1;
        self.next_client_id
    }

    fn allocate_order_id(&mut self) -> EntityId {
        self.next_order_id += 1;
        self.next_order_id
    }

    fn with_orders(&self, client: &Client) -> Client {
        let mut client = client.clone();
        client.orders = self
            .orders
            .values()
            .filter(|order| order.client_id == client.id)
            .cloned()
            .collect();
        client
    }
}

/// In-memory record store
///
/// Useful for testing and development. Both tables sit behind one `RwLock`,
/// so a multi-record write such as a cascade delete is atomic. Ids start at 1
/// and are never reused.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create a store stamping orders with the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store stamping orders with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            clock,
        }
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get_client(&self, id: EntityId) -> ServiceResult<Option<Client>> {
        let tables = self.read()?;
        Ok(tables.clients.get(&id).map(|c| tables.with_orders(c)))
    }

    async fn list_clients(&self) -> ServiceResult<Vec<Client>> {
        let tables = self.read()?;
        Ok(tables
            .clients
            .values()
            .map(|c| tables.with_orders(c))
            .collect())
    }

    async fn save_client(&self, mut client: Client) -> ServiceResult<Client> {
        let mut tables = self.write()?;

        if client.is_new() {
            client.id = tables.allocate_client_id();
        } else if !tables.clients.contains_key(&client.id) {
            return Err(EntityError::not_found::<Client>(client.id).into());
        }
        client.orders.clear();
        tables.clients.insert(client.id, client.clone());

        Ok(tables.with_orders(&client))
    }

    async fn save_client_with_orders(
        &self,
        mut client: Client,
        orders: Vec<Order>,
    ) -> ServiceResult<Client> {
        let mut tables = self.write()?;
        let now = self.clock.now();

        client.id = tables.allocate_client_id();
        client.orders.clear();
        tables.clients.insert(client.id, client.clone());

        for mut order in orders {
            order.id = tables.allocate_order_id();
            order.client_id = client.id;
            order.last_update = now;
            tables.orders.insert(order.id, order);
        }

        Ok(tables.with_orders(&client))
    }

    async fn delete_client(&self, id: EntityId, cascade: bool) -> ServiceResult<bool> {
        let mut tables = self.write()?;
        if !tables.clients.contains_key(&id) {
            return Ok(false);
        }

        let owned: Vec<EntityId> = tables
            .orders
            .values()
            .filter(|order| order.client_id == id)
            .map(|order| order.id)
            .collect();

        if !owned.is_empty() && !cascade {
            return Err(EntityError::HasDependents {
                entity_type: Client::resource_name_singular().to_string(),
                id,
                dependents: owned.len(),
            }
            .into());
        }

        for order_id in owned {
            tables.orders.remove(&order_id);
        }
        tables.clients.remove(&id);
        Ok(true)
    }

    async fn get_order(&self, id: EntityId) -> ServiceResult<Option<Order>> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    async fn list_orders(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.read()?.orders.values().cloned().collect())
    }

    async fn orders_of_client(&self, client_id: EntityId) -> ServiceResult<Vec<Order>> {
        Ok(self
            .read()?
            .orders
            .values()
            .filter(|order| order.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn save_order(&self, mut order: Order) -> ServiceResult<Order> {
        let mut tables = self.write()?;

        if !tables.clients.contains_key(&order.client_id) {
            return Err(EntityError::not_found::<Client>(order.client_id).into());
        }

        let now = self.clock.now();
        if order.is_new() {
            order.id = tables.allocate_order_id();
            order.last_update = now;
        } else {
            let previous = tables
                .orders
                .get(&order.id)
                .ok_or_else(|| EntityError::not_found::<Order>(order.id))?;
            // never move backwards, even if the clock does
            order.last_update = now.max(previous.last_update);
        }

        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn delete_order(&self, id: EntityId) -> ServiceResult<bool> {
        Ok(self.write()?.orders.remove(&id).is_some())
    }

    async fn delete_orders(&self, ids: &[EntityId]) -> ServiceResult<usize> {
        let mut tables = self.write()?;
        Ok(ids
            .iter()
            .filter(|id| tables.orders.remove(*id).is_some())
            .count())
    }

    async fn query_orders(
        &self,
        specification: &Specification<Order>,
        page: PageRequest,
    ) -> ServiceResult<Vec<Order>> {
        let tables = self.read()?;
        Ok(tables
            .orders
            .values()
            .filter(|order| specification.is_satisfied_by(order))
            .skip(page.offset())
            .take(page.size)
            .cloned()
            .collect())
    }
}
