//! Order record and its partial-update patch

use crate::core::entity::{Entity, EntityId, UNSAVED_ID};
use crate::core::merge::{Merge, merge_field};
use crate::core::validation::validators::{non_negative, not_blank};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product ordered by exactly one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,

    #[validate(custom(function = "not_blank"))]
    pub product: String,

    #[validate(custom(function = "non_negative"))]
    pub cost: Decimal,

    /// Owning client, always resolved against the store before a write
    pub client_id: EntityId,

    /// Stamped by the record store on every successful write
    pub last_update: DateTime<Utc>,
}

impl Order {
    /// Create an order that has not been persisted yet
    pub fn new(product: impl Into<String>, cost: Decimal, client_id: EntityId) -> Self {
        Self {
            id: UNSAVED_ID,
            product: product.into(),
            cost,
            client_id,
            last_update: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl Entity for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Partial update of an [`Order`]
///
/// `client_id` is not merged: the update pipeline re-resolves the client and
/// always writes the resolved id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[validate(custom(function = "not_blank"))]
    pub product: Option<String>,

    #[validate(custom(function = "non_negative"))]
    pub cost: Option<Decimal>,

    pub client_id: Option<EntityId>,
}

impl OrderPatch {
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_client(mut self, client_id: EntityId) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

impl Merge for OrderPatch {
    type Target = Order;

    fn merge(&self, mut target: Order) -> Order {
        merge_field(&mut target.product, &self.product);
        merge_field(&mut target.cost, &self.cost);
        target
    }

    fn is_empty(&self) -> bool {
        self.product.is_none() && self.cost.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stored(id: EntityId, product: &str, cost: Decimal, client_id: EntityId) -> Order {
        Order {
            id,
            product: product.to_string(),
            cost,
            client_id,
            last_update: Utc::now(),
        }
    }

    #[test]
    fn test_merge_cost_only() {
        let existing = stored(7, "X", dec!(10), 3);
        let patch = OrderPatch::default().with_cost(dec!(50));

        let merged = patch.merge(existing.clone());

        assert_eq!(merged.id, 7);
        assert_eq!(merged.product, "X");
        assert_eq!(merged.cost, dec!(50));
        assert_eq!(merged.client_id, 3);
        assert_eq!(merged.last_update, existing.last_update);
    }

    #[test]
    fn test_merge_every_field_present() {
        let existing = stored(1, "Gadget", dec!(4.5), 2);
        let patch = OrderPatch::default()
            .with_product("Widget")
            .with_cost(dec!(9.99));

        let merged = patch.merge(existing);

        assert_eq!(merged.product, "Widget");
        assert_eq!(merged.cost, dec!(9.99));
    }

    #[test]
    fn test_merge_never_touches_client_or_identity() {
        let existing = stored(5, "Gadget", dec!(1), 2);
        let patch = OrderPatch::default().with_client(99);

        let merged = patch.merge(existing.clone());

        assert!(patch.is_empty());
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = stored(5, "Gadget", dec!(1), 2);
        let patch = OrderPatch::default().with_product("Widget B");

        let once = patch.merge(existing);
        let twice = patch.merge(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_patch_validation() {
        assert!(OrderPatch::default().validate().is_ok());
        assert!(
            OrderPatch::default()
                .with_cost(dec!(-0.01))
                .validate()
                .is_err()
        );
        assert!(OrderPatch::default().with_product(" ").validate().is_err());
    }

    #[test]
    fn test_new_order_is_unsaved() {
        let order = Order::new("Widget", dec!(3), 1);
        assert!(order.is_new());
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = stored(1, "Widget", dec!(2.50), 4);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["clientId"], 4);
        assert_eq!(json["cost"], "2.50");
        assert!(json.get("lastUpdate").is_some());
    }
}
