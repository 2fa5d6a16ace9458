//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

use super::super::host::ServerHost;
use crate::server::router::build_api_routes;
use axum::http::HeaderValue;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Prefix of every versioned route
pub const API_PREFIX: &str = "/api/v1";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Client and order routes under [`API_PREFIX`]
    /// - Request tracing on every route
    /// - CORS, when `server.cors_origins` is not empty
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        let cors = cors_layer(&host.config.server.cors_origins);
        let router = Self::health_routes().nest(API_PREFIX, build_api_routes(host));
        let layers = ServiceBuilder::new().layer(TraceLayer::new_for_http());

        match cors {
            Some(cors) => router.layer(layers.layer(cors)),
            None => router.layer(layers),
        }
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME")
        }))
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        // invalid values are rejected by ServiceConfig::validate
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::core::clock::SystemClock;
    use crate::storage::InMemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn router(config: ServiceConfig) -> Router {
        let host = ServerHost::from_components(
            config,
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
        );
        RestExposure::build_router(Arc::new(host))
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = router(ServiceConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_routes_are_versioned() {
        let app = router(ServiceConfig::default());

        let versioned = app
            .clone()
            .oneshot(Request::get("/api/v1/order").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bare = app
            .oneshot(Request::get("/order").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(versioned.status(), StatusCode::OK);
        assert_eq!(bare.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_only_when_configured() {
        let request = || {
            Request::get("/health")
                .header(header::ORIGIN, "https://desk.example.com")
                .body(Body::empty())
                .unwrap()
        };

        let response = router(ServiceConfig::default())
            .oneshot(request())
            .await
            .unwrap();
        assert!(
            !response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );

        let mut config = ServiceConfig::default();
        config.server.cors_origins = vec!["https://desk.example.com".to_string()];
        let response = router(config).oneshot(request()).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://desk.example.com"
        );
    }
}
