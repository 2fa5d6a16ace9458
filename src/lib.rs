//! # Order Desk
//!
//! A client and order management service exposing a JSON API over HTTP.
//!
//! ## Features
//!
//! - **Composable Filtering**: optional criteria folded into one conjunctive
//!   [`Specification`](core::Specification), read one page at a time
//! - **Partial Updates**: explicit typed patches merged onto stored records
//! - **Update Cooldown**: an order written less than a configurable time ago
//!   rejects further updates with a retry hint
//! - **Typed Errors**: every failure maps to a stable code and HTTP status
//! - **Configuration-Based**: listener, cooldown and delete policy from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_desk::prelude::*;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let guard = UpdateGuard::new(Duration::seconds(5), Arc::new(SystemClock));
//! let orders = OrderService::new(store.clone(), guard);
//! let clients = ClientService::new(store, ClientDeletePolicy::Reject);
//!
//! let acme = clients.create(Client::new("Acme")).await?;
//! let order = orders.create(Order::new("Widget", dec!(10), acme.id)).await?;
//!
//! // Within five seconds this fails with CONCURRENT_UPDATE
//! orders.update(order.id, OrderPatch::default().with_cost(dec!(50))).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        clock::{Clock, ManualClock, SystemClock},
        entity::{Entity, EntityId, UNSAVED_ID},
        error::{ServiceError, ServiceResult},
        guard::{Mutability, UpdateGuard},
        merge::Merge,
        query::{OrderFilter, PageRequest},
        service::{ClientService, OrderService},
        specification::Specification,
        store::RecordStore,
    };

    // === Entities ===
    pub use crate::entities::{Client, ClientPatch, Order, OrderPatch};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::{ClientDeletePolicy, ServiceConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Duration, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
