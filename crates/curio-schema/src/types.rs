//! Core type definitions for the schema.

use serde::Serialize;

/// Scalar storage types for entity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarType {
    /// Boolean value.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// UTF-8 string.
    String,
    /// Binary data.
    Bytes,
    /// UTC timestamp.
    Timestamp,
}

/// Cardinality of a relation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    /// Reference to a single related record (foreign key side).
    One,
    /// Set of related records (collection side).
    Many,
}

/// Declared type of an entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// A plain scalar value.
    Scalar(ScalarType),
    /// A string-kinded credential field, hashed on write by the model layer.
    Password,
    /// A reference to one or many records of another entity.
    Relation {
        /// Target entity name.
        target: String,
        /// To-one or to-many.
        cardinality: Cardinality,
    },
}

impl ScalarType {
    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ScalarType::Int | ScalarType::Float)
    }

    /// Check if this type is a string-like type.
    pub fn is_string_like(&self) -> bool {
        matches!(self, ScalarType::String | ScalarType::Bytes)
    }

    /// Human-readable name, used in coercion errors.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
            ScalarType::Timestamp => "timestamp",
        }
    }
}

impl FieldType {
    /// Create a to-one relation type.
    pub fn relation(target: impl Into<String>) -> Self {
        FieldType::Relation {
            target: target.into(),
            cardinality: Cardinality::One,
        }
    }

    /// Create a to-many relation type.
    pub fn relation_many(target: impl Into<String>) -> Self {
        FieldType::Relation {
            target: target.into(),
            cardinality: Cardinality::Many,
        }
    }

    /// Check if this field is a relation to another entity.
    pub fn is_relation(&self) -> bool {
        matches!(self, FieldType::Relation { .. })
    }

    /// Check if this field is a to-many relation.
    pub fn is_many(&self) -> bool {
        matches!(
            self,
            FieldType::Relation {
                cardinality: Cardinality::Many,
                ..
            }
        )
    }

    /// Get the related entity name if this is a relation.
    pub fn relation_target(&self) -> Option<&str> {
        match self {
            FieldType::Relation { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Get the inner scalar type if this is a scalar-based type.
    ///
    /// Password fields are string-kinded.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            FieldType::Scalar(s) => Some(*s),
            FieldType::Password => Some(ScalarType::String),
            FieldType::Relation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_checks() {
        assert!(ScalarType::Int.is_numeric());
        assert!(ScalarType::Float.is_numeric());
        assert!(!ScalarType::String.is_numeric());
        assert!(!ScalarType::Bool.is_numeric());

        assert!(ScalarType::String.is_string_like());
        assert!(ScalarType::Bytes.is_string_like());
        assert!(!ScalarType::Timestamp.is_string_like());
    }

    #[test]
    fn test_relation_builders() {
        let one = FieldType::relation("User");
        assert!(one.is_relation());
        assert!(!one.is_many());
        assert_eq!(one.relation_target(), Some("User"));
        assert!(one.scalar_type().is_none());

        let many = FieldType::relation_many("Item");
        assert!(many.is_many());
        assert_eq!(many.relation_target(), Some("Item"));
    }

    #[test]
    fn test_password_is_string_kinded() {
        assert_eq!(FieldType::Password.scalar_type(), Some(ScalarType::String));
        assert!(!FieldType::Password.is_relation());
    }
}
