//! HTTP server for the client and order API
//!
//! This module provides a `ServerBuilder` that wires the services on top of a
//! record store and exposes them over REST.

pub mod builder;
pub mod dto;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
