//! Field definitions for entities.

use serde::Serialize;

use crate::types::{FieldType, ScalarType};
use crate::value::Value;
use crate::Error;

/// A field definition within an entity.
///
/// Mirrors the attribute options of the persisted schema: required vs.
/// optional, nullable, unique, indexed, and the declared type used for
/// value coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field data type.
    pub field_type: FieldType,
    /// Whether a value must be supplied at construction.
    pub required: bool,
    /// Whether the stored value may be null.
    pub nullable: bool,
    /// Whether the storage layer enforces uniqueness for this field.
    pub unique: bool,
    /// Whether this field should be indexed.
    pub indexed: bool,
}

impl FieldDef {
    /// Create a new required field.
    pub fn required(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Scalar(scalar),
            required: true,
            nullable: false,
            unique: false,
            indexed: false,
        }
    }

    /// Create an optional field (required = false).
    pub fn optional(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Scalar(scalar),
            required: false,
            nullable: false,
            unique: false,
            indexed: false,
        }
    }

    /// Create an optional password field, hashed on write by the model layer.
    pub fn password(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Password,
            required: false,
            nullable: false,
            unique: false,
            indexed: false,
        }
    }

    /// Create a required to-one relation field (foreign key side).
    pub fn relation(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::relation(target),
            required: true,
            nullable: false,
            unique: false,
            indexed: false,
        }
    }

    /// Create an optional to-many relation field (collection side).
    pub fn many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::relation_many(target),
            required: false,
            nullable: false,
            unique: false,
            indexed: false,
        }
    }

    /// Mark the stored value as nullable.
    pub fn with_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as unique.
    pub fn with_unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark as indexed.
    pub fn with_index(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Check if this field is a relation.
    pub fn is_relation(&self) -> bool {
        self.field_type.is_relation()
    }

    /// Coerce a raw value into this field's declared type.
    ///
    /// The literal empty string always passes through verbatim, for every
    /// field type. Cleared fields are represented as the empty string on
    /// the wire, and coercing it would reject otherwise-valid input.
    pub fn coerce(&self, raw: Value) -> Result<Value, Error> {
        if matches!(&raw, Value::Str(s) if s.is_empty()) {
            return Ok(raw);
        }
        match &self.field_type {
            FieldType::Scalar(scalar) => crate::value::coerce_scalar(&self.name, *scalar, raw),
            FieldType::Password => crate::value::coerce_scalar(&self.name, ScalarType::String, raw),
            FieldType::Relation { .. } => match raw {
                v @ (Value::Ref(_) | Value::RefSet(_)) => Ok(v),
                other => Err(Error::Coercion {
                    field: self.name.clone(),
                    expected: "record reference",
                    got: other.kind().to_string(),
                }),
            },
        }
    }
}
