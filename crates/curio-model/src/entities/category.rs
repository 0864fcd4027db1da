//! Catalog categories.

use std::sync::OnceLock;

use curio_schema::{EntityDef, FieldDef, RecordRef, ScalarType, Value};

use crate::convert;
use crate::lifecycle::Lifecycle;
use crate::record::Record;
use crate::stamp::Stamps;
use crate::Error;

/// A catalog category, holding many items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    /// Primary key, assigned by the storage layer.
    pub id: Option<i64>,
    /// Creation/modification timestamps.
    pub stamps: Stamps,
    /// Creating user's id.
    pub author: Option<i64>,
    /// Category title, unique across the catalog.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Items in this category.
    pub items: Vec<RecordRef>,
}

impl Record for Category {
    fn entity_def() -> &'static EntityDef {
        static DEF: OnceLock<EntityDef> = OnceLock::new();
        DEF.get_or_init(|| {
            EntityDef::new("Category")
                .with_field(FieldDef::optional("author", ScalarType::Int).with_nullable())
                .with_field(FieldDef::required("title", ScalarType::String).with_unique())
                .with_field(FieldDef::optional("description", ScalarType::String).with_nullable())
                .with_field(FieldDef::many("items", "Item"))
        })
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "created" => Some(self.stamps.created.into()),
            "updated" => Some(self.stamps.updated.into()),
            "author" => Some(self.author.into()),
            "title" => Some(self.title.clone().into()),
            "description" => Some(self.description.clone().into()),
            "items" => Some(self.items.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), Error> {
        match field {
            "author" => self.author = convert::into_opt_int(field, value)?,
            "title" => self.title = convert::into_string(field, value)?,
            "description" => self.description = convert::into_opt_string(field, value)?,
            "items" => self.items = convert::into_refs(field, value)?,
            _ => {
                return Err(curio_schema::Error::UnknownField {
                    entity: "Category".into(),
                    field: field.into(),
                }
                .into())
            }
        }
        Ok(())
    }
}

impl Lifecycle for Category {
    fn before_insert(&mut self) -> Result<(), Error> {
        self.stamps.stamp_insert();
        Ok(())
    }

    fn before_update(&mut self) -> Result<(), Error> {
        self.stamps.stamp_update();
        Ok(())
    }
}
