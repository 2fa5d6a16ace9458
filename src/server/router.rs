//! Route tables for the REST API

use super::handlers::{
    AppState, create_client, create_client_with_orders, create_order, delete_client,
    delete_order, filter_orders, get_client, get_order, list_client_orders, list_clients,
    list_orders, update_client, update_order,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build client routes
///
/// - GET /client - List clients with their orders
/// - POST /client - Create a client
/// - POST /client/save-with-orders - Create a client and its orders
/// - GET /client/{id} - Get a client
/// - PUT /client/{id} - Partially update a client
/// - DELETE /client/{id} - Delete a client
/// - GET /client/{id}/orders - List the orders of a client
pub fn build_client_routes(state: AppState) -> Router {
    Router::new()
        .route("/client", get(list_clients).post(create_client))
        .route("/client/save-with-orders", post(create_client_with_orders))
        .route(
            "/client/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/client/{id}/orders", get(list_client_orders))
        .with_state(state)
}

/// Build order routes
///
/// - GET /order - List orders
/// - POST /order - Create an order
/// - GET /order/filter - One page of filtered orders
/// - GET /order/{id} - Get an order
/// - PUT /order/{id} - Partially update an order
/// - DELETE /order/{id} - Delete an order
pub fn build_order_routes(state: AppState) -> Router {
    Router::new()
        .route("/order", get(list_orders).post(create_order))
        .route("/order/filter", get(filter_orders))
        .route(
            "/order/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .with_state(state)
}

/// Client and order routes, without the version prefix
pub fn build_api_routes(state: AppState) -> Router {
    build_client_routes(state.clone()).merge(build_order_routes(state))
}
