//! Creation/modification timestamps shared by all entities.

use chrono::{DateTime, Utc};

/// The `created`/`updated` timestamp pair.
///
/// Stamped by lifecycle hooks only; the generic marshalling paths never
/// read these names from input or assign them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stamps {
    /// Set once, on insert.
    pub created: Option<DateTime<Utc>>,
    /// Refreshed on every insert and update.
    pub updated: Option<DateTime<Utc>>,
}

impl Stamps {
    /// Stamp both timestamps for a new record.
    pub fn stamp_insert(&mut self) {
        let now = Utc::now();
        self.created = Some(now);
        self.updated = Some(now);
    }

    /// Refresh the modification timestamp.
    pub fn stamp_update(&mut self) {
        self.updated = Some(Utc::now());
    }
}
