//! Immutable schema registry, built once at process start.
//!
//! Replaces a mutable module-scope schema object: entities are registered
//! explicitly through the builder, validated as a set, and the resulting
//! registry is passed by reference to the storage layer.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::entity::{ConstraintDef, EntityDef};
use crate::{is_reserved, Error};

/// Builder collecting entity definitions for a [`SchemaRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entities: Vec<EntityDef>,
}

impl RegistryBuilder {
    /// Register an entity definition.
    pub fn register(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Validate the registered set and build the immutable registry.
    ///
    /// Rejects duplicate entity names, reserved field names, and relations
    /// targeting unregistered entities. Unique, foreign-key, and join-table
    /// constraints are synthesized from field declarations.
    pub fn build(self) -> Result<SchemaRegistry, Error> {
        let mut entities: BTreeMap<String, EntityDef> = BTreeMap::new();
        for entity in self.entities {
            if entities.contains_key(&entity.name) {
                return Err(Error::DuplicateEntity(entity.name));
            }
            for field in &entity.fields {
                if is_reserved(&field.name) {
                    return Err(Error::ReservedField {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
            entities.insert(entity.name.clone(), entity);
        }

        for entity in entities.values() {
            for field in entity.relation_fields() {
                let target = field
                    .field_type
                    .relation_target()
                    .unwrap_or_default()
                    .to_string();
                if !entities.contains_key(&target) {
                    return Err(Error::UnknownRelationTarget {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                        target,
                    });
                }
            }
        }

        let constraints = synthesize_constraints(&entities);
        for entity in entities.values() {
            debug!(
                entity = %entity.name,
                fields = entity.fields.len(),
                "registered entity"
            );
        }

        Ok(SchemaRegistry {
            entities,
            constraints,
        })
    }
}

/// An immutable, validated snapshot of the entire schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaRegistry {
    entities: BTreeMap<String, EntityDef>,
    constraints: Vec<ConstraintDef>,
}

impl SchemaRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Get an entity by name.
    pub fn entity(&self, name: &str) -> Result<&EntityDef, Error> {
        self.entities
            .get(name)
            .ok_or_else(|| Error::UnknownEntity(name.to_string()))
    }

    /// Check whether an entity is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// List all entity names, sorted.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(|s| s.as_str()).collect()
    }

    /// All synthesized constraints, for the storage layer's consumption.
    pub fn constraints(&self) -> &[ConstraintDef] {
        &self.constraints
    }

    /// Constraints that apply to one entity.
    pub fn constraints_for(&self, entity: &str) -> Vec<&ConstraintDef> {
        self.constraints
            .iter()
            .filter(|c| match c {
                ConstraintDef::Unique { entity: e, .. } => e == entity,
                ConstraintDef::ForeignKey { entity: e, .. } => e == entity,
                ConstraintDef::JoinTable { left, right, .. } => left == entity || right == entity,
            })
            .collect()
    }
}

fn synthesize_constraints(entities: &BTreeMap<String, EntityDef>) -> Vec<ConstraintDef> {
    let mut constraints = Vec::new();

    for entity in entities.values() {
        for field in entity.unique_fields() {
            constraints.push(ConstraintDef::unique(&entity.name, &field.name));
        }
        for field in entity.relation_fields() {
            let target = field.field_type.relation_target().unwrap_or_default();
            if field.field_type.is_many() {
                // A join table exists only when the target declares a
                // to-many relation back; one-to-many pairs carry their
                // foreign key on the one side.
                let reciprocal = entities.get(target).is_some_and(|t| {
                    t.relation_fields().any(|f| {
                        f.field_type.is_many()
                            && f.field_type.relation_target() == Some(entity.name.as_str())
                    })
                });
                if reciprocal {
                    let join = ConstraintDef::join_table(&entity.name, target);
                    if !constraints.contains(&join) {
                        constraints.push(join);
                    }
                }
            } else {
                constraints.push(ConstraintDef::foreign_key(
                    &entity.name,
                    &field.name,
                    target,
                ));
            }
        }
    }

    constraints
}
