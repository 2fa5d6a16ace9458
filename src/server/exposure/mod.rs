//! API exposure modules
//!
//! Each exposure type consumes a `ServerHost` and produces a Router for that
//! protocol. Only REST is provided.

pub mod rest;

pub use rest::RestExposure;
