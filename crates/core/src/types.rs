/// Entity identifiers are opaque strings (UUIDs for generated rows,
/// short literals for fixture rows).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}
