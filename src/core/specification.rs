//! Composable predicates over records and the order filter builder
//!
//! A [`Specification`] is an ordered list of predicates joined by AND. The
//! order filter is translated into one by walking [`ORDER_RULES`]: each rule
//! looks at one filter dimension and contributes at most one conjunct. A new
//! dimension is one more rule in that list; the combination logic never
//! changes.

use crate::core::error::{ServiceResult, ValidationError};
use crate::core::query::{OrderFilter, PageRequest};
use crate::entities::Order;
use std::fmt;
use validator::Validate;

/// A boxed predicate over records of type `T`
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Conjunction of predicates over `T`
///
/// An empty specification is satisfied by every record.
pub struct Specification<T> {
    conjuncts: Vec<Predicate<T>>,
}

impl<T> Specification<T> {
    /// Specification matching every record
    pub fn all() -> Self {
        Self {
            conjuncts: Vec::new(),
        }
    }

    /// Add one more conjunct
    pub fn and(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.conjuncts.push(Box::new(predicate));
        self
    }

    /// Add a conjunct only when one is given
    pub fn and_maybe(mut self, predicate: Option<Predicate<T>>) -> Self {
        if let Some(predicate) = predicate {
            self.conjuncts.push(predicate);
        }
        self
    }

    /// Check a record against every conjunct, in order
    pub fn is_satisfied_by(&self, record: &T) -> bool {
        self.conjuncts.iter().all(|predicate| predicate(record))
    }

    /// Number of conjuncts
    pub fn len(&self) -> usize {
        self.conjuncts.len()
    }

    /// Check if the specification matches every record
    pub fn is_empty(&self) -> bool {
        self.conjuncts.is_empty()
    }
}

impl<T> Default for Specification<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("conjuncts", &self.conjuncts.len())
            .finish()
    }
}

/// A rule turning one filter dimension into an optional predicate
pub type OrderRule = fn(&OrderFilter) -> Option<Predicate<Order>>;

/// Rules applied to every order filter, in order
pub const ORDER_RULES: &[OrderRule] = &[
    product_contains,
    cost_at_least,
    cost_at_most,
    owned_by_client,
];

fn product_contains(filter: &OrderFilter) -> Option<Predicate<Order>> {
    let needle = filter.product.clone()?;
    Some(Box::new(move |order: &Order| {
        order.product.contains(needle.as_str())
    }))
}

fn cost_at_least(filter: &OrderFilter) -> Option<Predicate<Order>> {
    let min = filter.min_cost?;
    Some(Box::new(move |order: &Order| order.cost >= min))
}

fn cost_at_most(filter: &OrderFilter) -> Option<Predicate<Order>> {
    let max = filter.max_cost?;
    Some(Box::new(move |order: &Order| order.cost <= max))
}

fn owned_by_client(filter: &OrderFilter) -> Option<Predicate<Order>> {
    let client_id = filter.client_id?;
    Some(Box::new(move |order: &Order| order.client_id == client_id))
}

/// A specification plus the page to read
#[derive(Debug)]
pub struct OrderQuery {
    pub specification: Specification<Order>,
    pub page: PageRequest,
}

impl OrderQuery {
    /// Translate a filter into a query
    ///
    /// Fails with a validation error for negative pages, empty pages or an
    /// inverted cost range. No defaults are applied here.
    pub fn from_filter(filter: &OrderFilter) -> ServiceResult<Self> {
        filter.validate()?;

        let page = page_request(filter.page_number, filter.page_size)?;
        let specification = ORDER_RULES
            .iter()
            .fold(Specification::all(), |spec, rule| spec.and_maybe(rule(filter)));

        Ok(Self {
            specification,
            page,
        })
    }
}

fn page_request(number: i64, size: i64) -> ServiceResult<PageRequest> {
    let number = usize::try_from(number).map_err(|_| ValidationError::FieldError {
        field: "pageNumber".to_string(),
        message: "must not be negative".to_string(),
    })?;
    let page = usize::try_from(size)
        .ok()
        .and_then(|size| PageRequest::new(number, size))
        .ok_or_else(|| ValidationError::FieldError {
            field: "pageSize".to_string(),
            message: "must be greater than zero".to_string(),
        })?;

    Ok(page)
}
