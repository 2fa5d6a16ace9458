//! Request and response bodies of the REST API

use crate::core::entity::{EntityId, UNSAVED_ID};
use crate::core::validation::validators::{non_negative, not_blank};
use crate::entities::{Client, Order};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /client`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertClientRequest {
    #[validate(length(min = 3, max = 30))]
    pub name: String,
}

impl From<UpsertClientRequest> for Client {
    fn from(request: UpsertClientRequest) -> Self {
        Client::new(request.name)
    }
}

/// Body of `POST /order`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(custom(function = "not_blank"))]
    pub product: String,

    #[validate(custom(function = "non_negative"))]
    pub cost: Decimal,

    pub client_id: EntityId,
}

impl From<CreateOrderRequest> for Order {
    fn from(request: CreateOrderRequest) -> Self {
        Order::new(request.product, request.cost, request.client_id)
    }
}

/// One order line of [`CreateClientWithOrdersRequest`]
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    #[validate(custom(function = "not_blank"))]
    pub product: String,

    #[validate(custom(function = "non_negative"))]
    pub cost: Decimal,
}

/// Body of `POST /client/save-with-orders`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientWithOrdersRequest {
    #[validate(length(min = 3, max = 30))]
    pub name: String,

    #[validate(nested)]
    #[serde(default)]
    pub orders: Vec<OrderLineRequest>,
}

impl CreateClientWithOrdersRequest {
    /// Split into the new client and its unsaved orders
    pub fn into_parts(self) -> (Client, Vec<Order>) {
        let orders = self
            .orders
            .into_iter()
            .map(|line| Order::new(line.product, line.cost, UNSAVED_ID))
            .collect();
        (Client::new(self.name), orders)
    }
}

/// Body of `GET /client`
#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    pub clients: Vec<Client>,
}

/// Body of every endpoint returning several orders
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_client_name_length_bounds() {
        let short = UpsertClientRequest {
            name: "Al".to_string(),
        };
        let long = UpsertClientRequest {
            name: "x".repeat(31),
        };
        let ok = UpsertClientRequest {
            name: "Acme".to_string(),
        };

        assert!(short.validate().is_err());
        assert!(long.validate().is_err());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_create_order_request_from_camel_case() {
        let request: CreateOrderRequest = serde_json::from_value(json!({
            "product": "Widget",
            "cost": "2.50",
            "clientId": 3
        }))
        .unwrap();

        let order = Order::from(request);
        assert_eq!(order.cost, dec!(2.50));
        assert_eq!(order.client_id, 3);
        assert_eq!(order.id, UNSAVED_ID);
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let request = CreateOrderRequest {
            product: "Widget".to_string(),
            cost: dec!(-1),
            client_id: 1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_nested_order_lines_are_validated() {
        let request: CreateClientWithOrdersRequest = serde_json::from_value(json!({
            "name": "Globex",
            "orders": [
                { "product": "Widget", "cost": "1" },
                { "product": "  ", "cost": "1" }
            ]
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_parts() {
        let request: CreateClientWithOrdersRequest = serde_json::from_value(json!({
            "name": "Globex",
            "orders": [{ "product": "Widget", "cost": "4" }]
        }))
        .unwrap();

        let (client, orders) = request.into_parts();
        assert_eq!(client.name, "Globex");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].cost, dec!(4));
    }
}
