//! Persisted record types

pub mod client;
pub mod order;

pub use client::{Client, ClientPatch};
pub use order::{Order, OrderPatch};
