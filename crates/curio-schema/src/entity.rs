//! Entity and constraint definitions.

use serde::Serialize;

use crate::field::FieldDef;

/// An entity definition (table schema).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDef {
    /// Entity name (unique within the schema).
    pub name: String,
    /// Field definitions, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    /// Create a new entity definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the entity.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate over fields with a unique constraint.
    pub fn unique_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.unique)
    }

    /// Iterate over indexed fields.
    pub fn indexed_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.indexed)
    }

    /// Iterate over relation fields.
    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_relation())
    }
}

/// A storage-level constraint synthesized from field declarations.
///
/// This layer only declares constraints; enforcement happens in the
/// storage engine at commit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstraintDef {
    /// Uniqueness constraint on a single field.
    Unique {
        /// Constraint name.
        name: String,
        /// Entity this constraint applies to.
        entity: String,
        /// The unique field.
        field: String,
    },
    /// Foreign key constraint from a to-one relation field.
    ForeignKey {
        /// Constraint name.
        name: String,
        /// Entity containing the foreign key.
        entity: String,
        /// Foreign key field.
        field: String,
        /// Referenced entity.
        references: String,
    },
    /// Join table implied by a many-to-many relation pair.
    JoinTable {
        /// Join table name.
        name: String,
        /// First entity (lexicographically smaller).
        left: String,
        /// Second entity.
        right: String,
    },
}

impl ConstraintDef {
    /// Create a unique constraint.
    pub fn unique(entity: impl Into<String>, field: impl Into<String>) -> Self {
        let entity = entity.into();
        let field = field.into();
        ConstraintDef::Unique {
            name: format!("{}_{}_unique", entity.to_lowercase(), field),
            entity,
            field,
        }
    }

    /// Create a foreign key constraint.
    pub fn foreign_key(
        entity: impl Into<String>,
        field: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        let entity = entity.into();
        let field = field.into();
        ConstraintDef::ForeignKey {
            name: format!("{}_{}_fk", entity.to_lowercase(), field),
            entity,
            field,
            references: references.into(),
        }
    }

    /// Create a join table declaration for a many-to-many pair.
    ///
    /// The pair is normalized so either side produces the same table.
    pub fn join_table(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        ConstraintDef::JoinTable {
            name: format!("{}_{}", left.to_lowercase(), right.to_lowercase()),
            left,
            right,
        }
    }

    /// Get the constraint name.
    pub fn name(&self) -> &str {
        match self {
            ConstraintDef::Unique { name, .. } => name,
            ConstraintDef::ForeignKey { name, .. } => name,
            ConstraintDef::JoinTable { name, .. } => name,
        }
    }

    /// Check if this is a unique constraint.
    pub fn is_unique(&self) -> bool {
        matches!(self, ConstraintDef::Unique { .. })
    }

    /// Check if this is a foreign key constraint.
    pub fn is_foreign_key(&self) -> bool {
        matches!(self, ConstraintDef::ForeignKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn test_entity_builder() {
        let entity = EntityDef::new("Category")
            .with_field(FieldDef::required("title", ScalarType::String).with_unique())
            .with_field(FieldDef::optional("description", ScalarType::String).with_nullable())
            .with_field(FieldDef::many("items", "Item"));

        assert_eq!(entity.name, "Category");
        assert_eq!(entity.fields.len(), 3);
        assert!(entity.get_field("title").is_some());
        assert!(entity.get_field("missing").is_none());
        assert_eq!(entity.unique_fields().count(), 1);
        assert_eq!(entity.relation_fields().count(), 1);
    }

    #[test]
    fn test_unique_constraint_name() {
        let c = ConstraintDef::unique("User", "email");
        assert!(c.is_unique());
        assert_eq!(c.name(), "user_email_unique");
    }

    #[test]
    fn test_foreign_key_constraint() {
        let c = ConstraintDef::foreign_key("OAuth", "user", "User");
        assert!(c.is_foreign_key());
        assert_eq!(c.name(), "oauth_user_fk");
    }

    #[test]
    fn test_join_table_normalizes_pair() {
        let a = ConstraintDef::join_table("Item", "Category");
        let b = ConstraintDef::join_table("Category", "Item");
        assert_eq!(a, b);
        assert_eq!(a.name(), "category_item");
    }
}
