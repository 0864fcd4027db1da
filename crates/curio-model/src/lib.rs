//! Curio Model - catalog entities with generic marshalling and hashing hooks.
//!
//! Entities declare their fields through `curio-schema` descriptors; the
//! [`Record`] trait then provides map construction/update, snapshots, and
//! JSON rendering generically over those declarations. Lifecycle hooks
//! stamp timestamps, validate the user login invariant, and derive file
//! content hashes; the storage engine, sessions, and HTTP layer live
//! elsewhere and call in through these surfaces.

mod convert;
pub mod entities;
pub mod error;
pub mod lifecycle;
pub mod password;
pub mod record;
pub mod stamp;

pub use entities::{catalog_schema, Category, Item, OAuth, StoredFile, User};
pub use error::Error;
pub use lifecycle::Lifecycle;
pub use password::PasswordParams;
pub use record::{Record, RelationHandler};
pub use stamp::Stamps;

/// Re-export schema types.
pub use curio_schema as schema;
