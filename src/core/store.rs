//! Record store trait consumed by the services

use crate::core::entity::EntityId;
use crate::core::error::ServiceResult;
use crate::core::query::PageRequest;
use crate::core::specification::Specification;
use crate::entities::{Client, Order};
use async_trait::async_trait;

/// Persistence collaborator for clients and orders
///
/// Implementations own id assignment and the `last_update` stamp of orders.
/// Every call is one suspension point; the services never hold a lock across
/// two calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // === Clients ===

    /// Get a client by id, with its orders filled in
    async fn get_client(&self, id: EntityId) -> ServiceResult<Option<Client>>;

    /// List all clients ordered by id, with their orders filled in
    async fn list_clients(&self) -> ServiceResult<Vec<Client>>;

    /// Insert a new client (`UNSAVED_ID`) or replace the name of an existing one
    ///
    /// Fails with `NotFound` for a non-zero id that is not stored.
    async fn save_client(&self, client: Client) -> ServiceResult<Client>;

    /// Insert a new client together with new orders, in one write
    async fn save_client_with_orders(
        &self,
        client: Client,
        orders: Vec<Order>,
    ) -> ServiceResult<Client>;

    /// Delete a client, and its orders when `cascade` is set
    ///
    /// Returns `false` when no such client exists. Without `cascade`, a
    /// client still owning orders is rejected with `HasDependents`.
    async fn delete_client(&self, id: EntityId, cascade: bool) -> ServiceResult<bool>;

    // === Orders ===

    /// Get an order by id
    async fn get_order(&self, id: EntityId) -> ServiceResult<Option<Order>>;

    /// List all orders ordered by id
    async fn list_orders(&self) -> ServiceResult<Vec<Order>>;

    /// List the orders owned by one client, ordered by id
    async fn orders_of_client(&self, client_id: EntityId) -> ServiceResult<Vec<Order>>;

    /// Insert a new order (`UNSAVED_ID`) or replace an existing one
    ///
    /// Stamps `last_update`. Fails with `NotFound` for a non-zero id that is
    /// not stored, or when `client_id` does not reference a stored client.
    async fn save_order(&self, order: Order) -> ServiceResult<Order>;

    /// Delete an order, returning `false` when it did not exist
    async fn delete_order(&self, id: EntityId) -> ServiceResult<bool>;

    /// Delete every listed order that exists
    async fn delete_orders(&self, ids: &[EntityId]) -> ServiceResult<usize>;

    /// Read one page of the orders satisfying `specification`, ordered by id
    async fn query_orders(
        &self,
        specification: &Specification<Order>,
        page: PageRequest,
    ) -> ServiceResult<Vec<Order>>;
}
