//! Core module containing the record model, the query and update machinery,
//! and the services built on top of them

pub mod clock;
pub mod entity;
pub mod error;
pub mod guard;
pub mod merge;
pub mod query;
pub mod service;
pub mod specification;
pub mod store;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{Entity, EntityId, UNSAVED_ID};
pub use error::{ServiceError, ServiceResult};
pub use guard::{Mutability, UpdateGuard};
pub use merge::Merge;
pub use query::{OrderFilter, PageRequest};
pub use service::{ClientService, OrderService};
pub use specification::{OrderQuery, Specification};
pub use store::RecordStore;
