//! Tests for paged order filtering
//!
//! These tests verify that:
//! - Unfiltered pages are disjoint and together cover every order
//! - Set criteria are combined with AND
//! - Malformed filters are rejected without reading the store

mod common;

use common::Harness;
use order_desk::core::error::ServiceError;
use order_desk::prelude::*;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;

fn ids(orders: &[Order]) -> Vec<EntityId> {
    orders.iter().map(|o| o.id).collect()
}

#[tokio::test]
async fn test_unfiltered_pages_are_disjoint_and_exhaustive() {
    let harness = Harness::new();
    let client = harness.client("Acme").await;
    for i in 0..23 {
        harness
            .order(&format!("Item {i}"), Decimal::from(i), client.id)
            .await;
    }

    let mut seen = BTreeSet::new();
    let mut total = 0;
    for page_number in 0..5 {
        let page = harness
            .orders()
            .filter(&OrderFilter::page(page_number, 5))
            .await
            .unwrap();
        total += page.len();
        seen.extend(ids(&page));
    }

    assert_eq!(total, 23);
    assert_eq!(seen.len(), 23);
    let all: BTreeSet<EntityId> = ids(&harness.orders().find_all().await.unwrap())
        .into_iter()
        .collect();
    assert_eq!(seen, all);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let harness = Harness::new();
    harness.seeded().await;

    let page = harness
        .orders()
        .filter(&OrderFilter::page(3, 10))
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_product_substring() {
    let harness = Harness::new();
    let (_, orders) = harness.seeded().await;

    let found = harness
        .orders()
        .filter(&OrderFilter::page(0, 10).with_product("Widget"))
        .await
        .unwrap();

    assert_eq!(ids(&found), vec![orders[0].id, orders[2].id]);
}

#[tokio::test]
async fn test_product_match_is_case_sensitive() {
    let harness = Harness::new();
    harness.seeded().await;

    let found = harness
        .orders()
        .filter(&OrderFilter::page(0, 10).with_product("widget"))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_criteria_are_combined_with_and() {
    let harness = Harness::new();
    let (acme, orders) = harness.seeded().await;
    let globex = harness.client("Globex").await;
    harness.order("Widget Mini", dec!(15), globex.id).await;

    let filter = OrderFilter::page(0, 10)
        .with_product("Widget")
        .with_cost_range(Some(dec!(10)), Some(dec!(20)))
        .with_client(acme.id);
    let found = harness.orders().filter(&filter).await.unwrap();

    assert_eq!(ids(&found), vec![orders[0].id]);
}

#[tokio::test]
async fn test_cost_bounds_are_inclusive() {
    let harness = Harness::new();
    let (_, orders) = harness.seeded().await;

    let found = harness
        .orders()
        .filter(&OrderFilter::page(0, 10).with_cost_range(Some(dec!(20)), Some(dec!(30))))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![orders[1].id, orders[2].id]);
}

#[tokio::test]
async fn test_filter_by_client() {
    let harness = Harness::new();
    harness.seeded().await;
    let globex = harness.client("Globex").await;
    let mini = harness.order("Widget Mini", dec!(15), globex.id).await;

    let found = harness
        .orders()
        .filter(&OrderFilter::page(0, 10).with_client(globex.id))
        .await
        .unwrap();
    assert_eq!(found, vec![mini]);
}

#[tokio::test]
async fn test_large_page_size_is_accepted() {
    let harness = Harness::new();
    let (_, orders) = harness.seeded().await;

    let found = harness
        .orders()
        .filter(&OrderFilter::page(0, 5000))
        .await
        .unwrap();
    assert_eq!(found, orders);
}

#[tokio::test]
async fn test_malformed_filters_are_rejected() {
    let harness = Harness::new();
    harness.seeded().await;

    let rejected = [
        OrderFilter::page(-1, 10),
        OrderFilter::page(0, 0),
        OrderFilter::page(0, 10).with_cost_range(Some(dec!(30)), Some(dec!(10))),
        OrderFilter::page(0, 10).with_cost_range(Some(dec!(-1)), None),
    ];

    for filter in rejected {
        let err = harness.orders().filter(&filter).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(_)),
            "{filter:?} should be rejected, got {err:?}"
        );
    }
}
