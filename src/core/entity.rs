//! Entity trait shared by the persisted record types

/// Identifier type used by every persisted record
pub type EntityId = i64;

/// Identifier carried by a record that has not been persisted yet
pub const UNSAVED_ID: EntityId = 0;

/// Base trait for persisted records.
///
/// Every record has:
/// - a server-assigned numeric id (`UNSAVED_ID` until first save)
/// - a singular and plural resource name used in error messages and routes
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "orders")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "order")
    fn resource_name_singular() -> &'static str;

    /// Get the identifier of this record
    fn id(&self) -> EntityId;

    /// Check if the record still waits for its first save
    fn is_new(&self) -> bool {
        self.id() == UNSAVED_ID
    }
}
