//! Curio Schema - declarative entity metadata for the catalog data model.
//!
//! This crate defines the schema vocabulary consumed by the model layer:
//! scalar and field types, per-entity field descriptors, relation and
//! constraint declarations, runtime values with named coercion functions,
//! and an immutable registry built once at process start.

pub mod entity;
pub mod error;
pub mod field;
pub mod registry;
pub mod types;
pub mod value;

pub use entity::{ConstraintDef, EntityDef};
pub use error::Error;
pub use field::FieldDef;
pub use registry::{RegistryBuilder, SchemaRegistry};
pub use types::{Cardinality, FieldType, ScalarType};
pub use value::{RecordRef, Value};

/// Field names reserved for the persistence layer. Entities never declare
/// them and the generic marshalling paths never read or write them.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created", "updated"];

/// Check whether a field name is reserved.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}
