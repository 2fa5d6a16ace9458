//! Update guard: a per-order cooldown between successful writes
//!
//! An order written less than one cooldown ago is `Locked`; otherwise it is
//! `Idle`. The state is derived from `last_update` and the clock at decision
//! time and never stored. This is a rate limit on mutation, not optimistic
//! versioning: two updates racing past the check can both be persisted.

use crate::core::clock::Clock;
use crate::core::entity::EntityId;
use crate::core::error::{EntityError, ServiceResult, UpdateError};
use crate::core::store::RecordStore;
use crate::entities::Order;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Cooldown applied when none is configured
pub const DEFAULT_UPDATE_COOLDOWN: Duration = Duration::seconds(5);

/// Mutability of an order at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// The cooldown has elapsed, updates are accepted
    Idle,
    /// Written too recently; `remaining` is left before it becomes `Idle`
    Locked { remaining: Duration },
}

/// Rejects updates to orders written less than `cooldown` ago
#[derive(Clone)]
pub struct UpdateGuard {
    cooldown: Duration,
    clock: Arc<dyn Clock>,
}

impl UpdateGuard {
    pub fn new(cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { cooldown, clock }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Derive the mutability of an order written at `last_update`
    pub fn state_at(&self, last_update: DateTime<Utc>, now: DateTime<Utc>) -> Mutability {
        let elapsed = now - last_update;
        if elapsed < self.cooldown {
            Mutability::Locked {
                remaining: self.cooldown - elapsed,
            }
        } else {
            Mutability::Idle
        }
    }

    /// Derive the mutability of `order` now
    pub fn state_of(&self, order: &Order) -> Mutability {
        self.state_at(order.last_update, self.clock.now())
    }

    /// Load the order and fail if it is still cooling down
    ///
    /// Returns the loaded snapshot. Performs exactly one store read and no
    /// write.
    pub async fn check_for_update(
        &self,
        store: &dyn RecordStore,
        order_id: EntityId,
    ) -> ServiceResult<Order> {
        let current = store
            .get_order(order_id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Order>(order_id))?;

        match self.state_of(&current) {
            Mutability::Idle => Ok(current),
            Mutability::Locked { remaining } => {
                tracing::warn!(
                    order_id,
                    remaining_ms = remaining.num_milliseconds(),
                    "rejecting update inside cooldown window"
                );
                Err(UpdateError::ConcurrentUpdate {
                    order_id,
                    // round up so a client never retries a hair too early
                    retry_after_ms: ceil_millis(remaining),
                }
                .into())
            }
        }
    }
}

fn ceil_millis(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds();
    if duration > Duration::milliseconds(millis) {
        millis + 1
    } else {
        millis
    }
}
