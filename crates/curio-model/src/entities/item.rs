//! Catalog items.

use std::sync::OnceLock;

use curio_schema::{EntityDef, FieldDef, RecordRef, ScalarType, Value};

use crate::convert;
use crate::lifecycle::Lifecycle;
use crate::record::Record;
use crate::stamp::Stamps;
use crate::Error;

/// A catalog item, belonging to any number of categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    /// Primary key, assigned by the storage layer.
    pub id: Option<i64>,
    /// Creation/modification timestamps.
    pub stamps: Stamps,
    /// Creating user's id.
    pub author: Option<i64>,
    /// Attached file id.
    pub image: Option<i64>,
    /// Item title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Categories this item appears in.
    pub categories: Vec<RecordRef>,
}

impl Record for Item {
    fn entity_def() -> &'static EntityDef {
        static DEF: OnceLock<EntityDef> = OnceLock::new();
        DEF.get_or_init(|| {
            EntityDef::new("Item")
                .with_field(FieldDef::optional("author", ScalarType::Int).with_nullable())
                .with_field(FieldDef::optional("image", ScalarType::Int).with_nullable())
                .with_field(FieldDef::required("title", ScalarType::String))
                .with_field(FieldDef::optional("description", ScalarType::String).with_nullable())
                .with_field(FieldDef::many("categories", "Category"))
        })
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "created" => Some(self.stamps.created.into()),
            "updated" => Some(self.stamps.updated.into()),
            "author" => Some(self.author.into()),
            "image" => Some(self.image.into()),
            "title" => Some(self.title.clone().into()),
            "description" => Some(self.description.clone().into()),
            "categories" => Some(self.categories.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), Error> {
        match field {
            "author" => self.author = convert::into_opt_int(field, value)?,
            "image" => self.image = convert::into_opt_int(field, value)?,
            "title" => self.title = convert::into_string(field, value)?,
            "description" => self.description = convert::into_opt_string(field, value)?,
            "categories" => self.categories = convert::into_refs(field, value)?,
            _ => {
                return Err(curio_schema::Error::UnknownField {
                    entity: "Item".into(),
                    field: field.into(),
                }
                .into())
            }
        }
        Ok(())
    }
}

impl Lifecycle for Item {
    fn before_insert(&mut self) -> Result<(), Error> {
        self.stamps.stamp_insert();
        Ok(())
    }

    fn before_update(&mut self) -> Result<(), Error> {
        self.stamps.stamp_update();
        Ok(())
    }
}
