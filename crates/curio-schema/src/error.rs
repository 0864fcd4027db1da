//! Schema-layer error types.

use thiserror::Error;

/// Errors raised by schema declaration, registry construction, and value
/// coercion.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity with the same name was registered twice.
    #[error("duplicate entity '{0}' in schema")]
    DuplicateEntity(String),

    /// An entity name was looked up that is not in the registry.
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// A field name was looked up that the entity does not declare.
    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField {
        /// Entity name.
        entity: String,
        /// Field name.
        field: String,
    },

    /// An entity declared a field using a reserved name.
    #[error("field '{field}' on entity '{entity}' uses a reserved name")]
    ReservedField {
        /// Entity name.
        entity: String,
        /// Offending field name.
        field: String,
    },

    /// A relation points at an entity that is not registered.
    #[error("relation '{entity}.{field}' targets unregistered entity '{target}'")]
    UnknownRelationTarget {
        /// Entity declaring the relation.
        entity: String,
        /// Relation field name.
        field: String,
        /// Missing target entity.
        target: String,
    },

    /// A relation value was supplied but no relation handler was given.
    #[error("relation value for field '{field}' supplied without a relation handler")]
    UnresolvedRelation {
        /// Relation field name.
        field: String,
    },

    /// A raw value could not be converted to the field's declared type.
    #[error("cannot coerce {got} into {expected} for field '{field}'")]
    Coercion {
        /// Field name.
        field: String,
        /// Expected type description.
        expected: &'static str,
        /// Description of the rejected value.
        got: String,
    },

    /// A required field had no value in the input map.
    #[error("required field '{field}' on entity '{entity}' missing from input")]
    MissingRequired {
        /// Entity name.
        entity: String,
        /// Field name.
        field: String,
    },
}
