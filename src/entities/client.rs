//! Client record and its partial-update patch

use super::order::Order;
use crate::core::entity::{Entity, EntityId, UNSAVED_ID};
use crate::core::merge::{Merge, merge_field};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer owning zero or more orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,

    #[validate(length(min = 3, max = 30))]
    pub name: String,

    /// Orders owned by this client, filled in by the store on read
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Client {
    /// Create a client that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            orders: Vec::new(),
        }
    }
}

impl Entity for Client {
    fn resource_name() -> &'static str {
        "clients"
    }

    fn resource_name_singular() -> &'static str {
        "client"
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Partial update of a [`Client`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[validate(length(min = 3, max = 30))]
    pub name: Option<String>,
}

impl Merge for ClientPatch {
    type Target = Client;

    fn merge(&self, mut target: Client) -> Client {
        merge_field(&mut target.name, &self.name);
        target
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
