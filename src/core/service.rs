//! Client and order services
//!
//! Services validate their inputs, talk to the [`RecordStore`] and never hold
//! state of their own, so one instance can serve concurrent requests for
//! different records.

use crate::config::ClientDeletePolicy;
use crate::core::entity::{EntityId, UNSAVED_ID};
use crate::core::error::{EntityError, ServiceResult};
use crate::core::guard::UpdateGuard;
use crate::core::merge::Merge;
use crate::core::query::OrderFilter;
use crate::core::specification::OrderQuery;
use crate::core::store::RecordStore;
use crate::entities::{Client, ClientPatch, Order, OrderPatch};
use std::sync::Arc;
use validator::Validate;

/// Order operations, including the guarded update pipeline
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn RecordStore>,
    guard: UpdateGuard,
}

impl OrderService {
    pub fn new(store: Arc<dyn RecordStore>, guard: UpdateGuard) -> Self {
        Self { store, guard }
    }

    /// The guard every update passes through
    pub fn guard(&self) -> &UpdateGuard {
        &self.guard
    }

    /// Read one page of the orders matching `filter`
    pub async fn filter(&self, filter: &OrderFilter) -> ServiceResult<Vec<Order>> {
        let query = OrderQuery::from_filter(filter)?;
        tracing::debug!(
            unfiltered = filter.is_unfiltered(),
            conjuncts = query.specification.len(),
            page = query.page.number,
            size = query.page.size,
            "filtering orders"
        );
        self.store
            .query_orders(&query.specification, query.page)
            .await
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Order>> {
        self.store.list_orders().await
    }

    pub async fn find_by_id(&self, id: EntityId) -> ServiceResult<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Order>(id).into())
    }

    /// Persist a new order for an existing client
    pub async fn create(&self, mut order: Order) -> ServiceResult<Order> {
        order.validate()?;
        let client = self.resolve_client(order.client_id).await?;

        order.id = UNSAVED_ID;
        order.client_id = client.id;
        let saved = self.store.save_order(order).await?;

        tracing::info!(order_id = saved.id, client_id = saved.client_id, "order created");
        Ok(saved)
    }

    /// Apply a partial update to an order
    ///
    /// 1. validate the patch
    /// 2. check the update guard (fails with `ConcurrentUpdate`)
    /// 3. resolve the client named by the patch, or the current one
    /// 4. load the existing order
    /// 5. merge the patch onto it
    /// 6. point it at the resolved client
    /// 7. persist, which stamps a new `last_update`
    ///
    /// Steps 1 to 6 never write, so any failure leaves the order untouched.
    pub async fn update(&self, order_id: EntityId, patch: OrderPatch) -> ServiceResult<Order> {
        patch.validate()?;
        tracing::debug!(order_id, ?patch, empty = patch.is_empty(), "updating order");

        let snapshot = self
            .guard
            .check_for_update(self.store.as_ref(), order_id)
            .await?;

        let client = self
            .resolve_client(patch.client_id.unwrap_or(snapshot.client_id))
            .await?;

        let existing = self.find_by_id(order_id).await?;

        let mut merged = patch.merge(existing);
        merged.client_id = client.id;

        let saved = self.store.save_order(merged).await?;
        tracing::info!(
            order_id = saved.id,
            client_id = saved.client_id,
            last_update = %saved.last_update,
            "order updated"
        );
        Ok(saved)
    }

    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        if !self.store.delete_order(id).await? {
            return Err(EntityError::not_found::<Order>(id).into());
        }
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }

    /// Delete every listed order that exists, returning how many were removed
    pub async fn delete_many(&self, ids: &[EntityId]) -> ServiceResult<usize> {
        let removed = self.store.delete_orders(ids).await?;
        tracing::info!(requested = ids.len(), removed, "orders deleted");
        Ok(removed)
    }

    async fn resolve_client(&self, client_id: EntityId) -> ServiceResult<Client> {
        self.store
            .get_client(client_id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Client>(client_id).into())
    }
}

/// Client operations
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn RecordStore>,
    delete_policy: ClientDeletePolicy,
}

impl ClientService {
    pub fn new(store: Arc<dyn RecordStore>, delete_policy: ClientDeletePolicy) -> Self {
        Self {
            store,
            delete_policy,
        }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Client>> {
        self.store.list_clients().await
    }

    pub async fn find_by_id(&self, id: EntityId) -> ServiceResult<Client> {
        self.store
            .get_client(id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Client>(id).into())
    }

    /// Orders owned by an existing client
    pub async fn orders_of(&self, id: EntityId) -> ServiceResult<Vec<Order>> {
        if self.store.get_client(id).await?.is_none() {
            return Err(EntityError::not_found::<Client>(id).into());
        }
        self.store.orders_of_client(id).await
    }

    pub async fn create(&self, mut client: Client) -> ServiceResult<Client> {
        client.validate()?;
        client.id = UNSAVED_ID;
        client.orders.clear();

        let saved = self.store.save_client(client).await?;
        tracing::info!(client_id = saved.id, "client created");
        Ok(saved)
    }

    /// Create a client and its first orders in one write
    pub async fn create_with_orders(
        &self,
        mut client: Client,
        orders: Vec<Order>,
    ) -> ServiceResult<Client> {
        client.validate()?;
        for order in &orders {
            order.validate()?;
        }
        client.id = UNSAVED_ID;
        client.orders.clear();

        let count = orders.len();
        let saved = self.store.save_client_with_orders(client, orders).await?;
        tracing::info!(client_id = saved.id, orders = count, "client created with orders");
        Ok(saved)
    }

    /// Apply a partial update to a client
    pub async fn update(&self, id: EntityId, patch: ClientPatch) -> ServiceResult<Client> {
        patch.validate()?;
        let existing = self.find_by_id(id).await?;

        let saved = self.store.save_client(patch.merge(existing)).await?;
        tracing::info!(client_id = saved.id, "client updated");
        Ok(saved)
    }

    /// Delete a client according to the configured policy
    ///
    /// `Reject` refuses while the client still owns orders; `Cascade` removes
    /// them with the client.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let cascade = matches!(self.delete_policy, ClientDeletePolicy::Cascade);
        if !self.store.delete_client(id, cascade).await? {
            return Err(EntityError::not_found::<Client>(id).into());
        }
        tracing::info!(client_id = id, cascade, "client deleted");
        Ok(())
    }
}
