//! Order filter and pagination parameters

use crate::core::entity::EntityId;
use crate::core::validation::validators::{non_negative, ordered_bounds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Filter over orders, with mandatory pagination
///
/// Every predicate field is optional; set fields are combined with AND.
/// The serde defaults for the page fields only apply when the filter is read
/// from a request; code building a filter by hand sets both explicitly.
///
/// # Example
/// ```text
/// GET /api/v1/order/filter?product=Widget&minCost=5&pageNumber=0&pageSize=20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "cost_bounds_ordered"))]
pub struct OrderFilter {
    /// Case-sensitive substring of the product name
    pub product: Option<String>,

    /// Inclusive lower cost bound
    #[validate(custom(function = "non_negative"))]
    pub min_cost: Option<Decimal>,

    /// Inclusive upper cost bound
    #[validate(custom(function = "non_negative"))]
    pub max_cost: Option<Decimal>,

    /// Owning client
    pub client_id: Option<EntityId>,

    /// Page index (starts at 0)
    #[serde(default)]
    #[validate(range(min = 0))]
    pub page_number: i64,

    /// Number of orders per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

fn cost_bounds_ordered(filter: &OrderFilter) -> Result<(), validator::ValidationError> {
    ordered_bounds(filter.min_cost.as_ref(), filter.max_cost.as_ref())
}

impl OrderFilter {
    /// Filter matching every order, one page at a time
    pub fn page(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_cost_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_cost = min;
        self.max_cost = max;
        self
    }

    pub fn with_client(mut self, client_id: EntityId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Check if no predicate field is set
    pub fn is_unfiltered(&self) -> bool {
        self.product.is_none()
            && self.min_cost.is_none()
            && self.max_cost.is_none()
            && self.client_id.is_none()
    }
}

/// Validated page coordinates handed to the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page index (starts at 0)
    pub number: usize,

    /// Number of items per page (at least 1)
    pub size: usize,
}

impl PageRequest {
    /// Create a page request, returning `None` when `size` is zero
    pub fn new(number: usize, size: usize) -> Option<Self> {
        (size > 0).then_some(Self { number, size })
    }

    /// Index of the first item of the page
    pub fn offset(&self) -> usize {
        self.number.saturating_mul(self.size)
    }
}
