//! Field-merge engine for partial updates
//!
//! A patch type lists every field of its target as an `Option`. Merging copies
//! each `Some` field onto the target and leaves the rest alone. Identity and
//! server-owned fields have no counterpart in the patch, so they can never be
//! overwritten by a caller.
//!
//! Each entity implements [`Merge`] with an explicit field list instead of a
//! generic walk over its fields, which keeps the merge testable field by field.

/// A partial record that can be merged onto a full one
pub trait Merge {
    /// The full record type this patch applies to
    type Target;

    /// Produce `target` with every field set in `self` overwritten
    fn merge(&self, target: Self::Target) -> Self::Target;

    /// Check whether the patch would leave any target unchanged
    fn is_empty(&self) -> bool;
}

/// Overwrite `slot` with a clone of `value` when the value is present
pub fn merge_field<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}
