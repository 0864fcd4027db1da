//! Entity lifecycle hooks.

use crate::Error;

/// Hooks invoked by the storage layer immediately before persisting.
///
/// Every entity stamps its timestamps here; some also validate invariants
/// (`User`) or derive content (`StoredFile`). A returned error aborts the
/// pending write.
pub trait Lifecycle {
    /// Called before a new record is inserted.
    fn before_insert(&mut self) -> Result<(), Error>;

    /// Called before a modified record is written back.
    fn before_update(&mut self) -> Result<(), Error>;
}
