//! HTTP handlers for clients and orders
//!
//! Handlers only translate between HTTP and the services of the
//! [`ServerHost`]; every rule lives in the services.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::dto::{
    ClientListResponse, CreateClientWithOrdersRequest, CreateOrderRequest, OrderListResponse,
    UpsertClientRequest,
};
use super::host::ServerHost;
use crate::core::entity::EntityId;
use crate::core::error::ServiceError;
use crate::core::query::OrderFilter;
use crate::core::validation::{ValidatedJson, ValidatedQuery};
use crate::entities::{Client, ClientPatch, Order, OrderPatch};

/// Application state shared across handlers
pub type AppState = Arc<ServerHost>;

// === Clients ===

pub async fn list_clients(
    State(host): State<AppState>,
) -> Result<Json<ClientListResponse>, ServiceError> {
    let clients = host.clients.find_all().await?;
    Ok(Json(ClientListResponse { clients }))
}

pub async fn get_client(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Client>, ServiceError> {
    Ok(Json(host.clients.find_by_id(id).await?))
}

pub async fn list_client_orders(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<OrderListResponse>, ServiceError> {
    let orders = host.clients.orders_of(id).await?;
    Ok(Json(OrderListResponse { orders }))
}

pub async fn create_client(
    State(host): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpsertClientRequest>,
) -> Result<Response, ServiceError> {
    let client = host.clients.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(client)).into_response())
}

/// Create a client and its orders in one request
pub async fn create_client_with_orders(
    State(host): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateClientWithOrdersRequest>,
) -> Result<Response, ServiceError> {
    let (client, orders) = request.into_parts();
    let client = host.clients.create_with_orders(client, orders).await?;
    Ok((StatusCode::CREATED, Json(client)).into_response())
}

pub async fn update_client(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
    ValidatedJson(patch): ValidatedJson<ClientPatch>,
) -> Result<Json<Client>, ServiceError> {
    Ok(Json(host.clients.update(id, patch).await?))
}

pub async fn delete_client(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, ServiceError> {
    host.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// === Orders ===

pub async fn list_orders(
    State(host): State<AppState>,
) -> Result<Json<OrderListResponse>, ServiceError> {
    let orders = host.orders.find_all().await?;
    Ok(Json(OrderListResponse { orders }))
}

/// One page of the orders matching the query-string filter
pub async fn filter_orders(
    State(host): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<OrderFilter>,
) -> Result<Json<OrderListResponse>, ServiceError> {
    let orders = host.orders.filter(&filter).await?;
    Ok(Json(OrderListResponse { orders }))
}

pub async fn get_order(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Order>, ServiceError> {
    Ok(Json(host.orders.find_by_id(id).await?))
}

pub async fn create_order(
    State(host): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> Result<Response, ServiceError> {
    let order = host.orders.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(order)).into_response())
}

/// Partial update, rejected with 409 while the order is cooling down
pub async fn update_order(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
    ValidatedJson(patch): ValidatedJson<OrderPatch>,
) -> Result<Json<Order>, ServiceError> {
    Ok(Json(host.orders.update(id, patch).await?))
}

pub async fn delete_order(
    State(host): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, ServiceError> {
    host.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
