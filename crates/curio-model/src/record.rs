//! Generic map/JSON marshalling over declared entity metadata.
//!
//! The operations here are written once and reused by every entity: they
//! walk the entity's field descriptors instead of hand-rolled per-entity
//! code. Construction and update consult the same selection and coercion
//! rules; snapshots and JSON rendering read back whatever the record holds.

use std::collections::{BTreeMap, HashMap};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use curio_schema::{is_reserved, EntityDef, FieldDef, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::Error;

/// Caller-supplied resolver turning a raw foreign-key-like value into a
/// `Ref`/`RefSet` for the named target entity.
pub type RelationHandler<'a> = &'a dyn Fn(&str, &Value) -> Result<Value, Error>;

/// A record type with declared fields and generic marshalling.
pub trait Record: Default {
    /// The entity's field descriptors.
    fn entity_def() -> &'static EntityDef;

    /// Read a field by name. `None` for undeclared names.
    ///
    /// The reserved `id`/`created`/`updated` fields are readable here even
    /// though the generic write paths never touch them.
    fn get(&self, field: &str) -> Option<Value>;

    /// Write a declared field.
    fn set(&mut self, field: &str, value: Value) -> Result<(), Error>;

    /// Construct a new record from a raw field map.
    ///
    /// For every declared field not in `exclude` (reserved fields are
    /// always skipped):
    /// - a present, non-null value is resolved through the relation
    ///   handler or the field's coercion and assigned;
    /// - an absent or null value on an optional field defaults to null
    ///   when nullable, else the empty string;
    /// - an absent value on a required field fails with
    ///   [`curio_schema::Error::MissingRequired`].
    fn from_map(
        data: &HashMap<String, Value>,
        handler: Option<RelationHandler<'_>>,
        exclude: &[&str],
    ) -> Result<Self, Error> {
        let def = Self::entity_def();
        let mut record = Self::default();
        for field in &def.fields {
            if exclude.contains(&field.name.as_str()) || is_reserved(&field.name) {
                continue;
            }
            match data.get(&field.name) {
                Some(raw) if !raw.is_null() => {
                    let value = resolve(field, raw, handler)?;
                    record.set(&field.name, value)?;
                }
                _ => {
                    if field.required {
                        return Err(curio_schema::Error::MissingRequired {
                            entity: def.name.clone(),
                            field: field.name.clone(),
                        }
                        .into());
                    }
                    let default = if field.nullable {
                        Value::Null
                    } else {
                        Value::Str(String::new())
                    };
                    record.set(&field.name, default)?;
                }
            }
        }
        Ok(record)
    }

    /// Update this record in place from a raw field map.
    ///
    /// Same selection and coercion rules as [`Record::from_map`], except
    /// absent and null keys change nothing. A present empty string is an
    /// explicit clear, distinct from an absent key.
    fn apply(
        &mut self,
        data: &HashMap<String, Value>,
        handler: Option<RelationHandler<'_>>,
        exclude: &[&str],
    ) -> Result<&mut Self, Error> {
        let def = Self::entity_def();
        for field in &def.fields {
            if exclude.contains(&field.name.as_str()) || is_reserved(&field.name) {
                continue;
            }
            if let Some(raw) = data.get(&field.name) {
                if raw.is_null() {
                    continue;
                }
                let value = resolve(field, raw, handler)?;
                self.set(&field.name, value)?;
            }
        }
        Ok(self)
    }

    /// Snapshot all declared fields (plus `id`/`created`/`updated`) as
    /// currently held, minus `exclude`.
    fn to_map(&self, exclude: &[&str]) -> BTreeMap<String, Value> {
        let def = Self::entity_def();
        let mut map = BTreeMap::new();
        for name in curio_schema::RESERVED_FIELDS {
            if !exclude.contains(&name) {
                if let Some(value) = self.get(name) {
                    map.insert(name.to_string(), value);
                }
            }
        }
        for field in &def.fields {
            if !exclude.contains(&field.name.as_str()) {
                if let Some(value) = self.get(&field.name) {
                    map.insert(field.name.clone(), value);
                }
            }
        }
        map
    }

    /// Render the full snapshot as pretty-printed JSON: 4-space indent,
    /// keys sorted, non-primitive values in their string form.
    fn to_json(&self) -> Result<String, Error> {
        let map: BTreeMap<String, JsonValue> = self
            .to_map(&[])
            .into_iter()
            .map(|(k, v)| (k, json_value(&v)))
            .collect();

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        map.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn resolve(
    field: &FieldDef,
    raw: &Value,
    handler: Option<RelationHandler<'_>>,
) -> Result<Value, Error> {
    if raw.is_empty_str() {
        return Ok(raw.clone());
    }
    if field.is_relation() {
        let target = field.field_type.relation_target().unwrap_or_default();
        return match handler {
            Some(resolve) => resolve(target, raw),
            None => Err(curio_schema::Error::UnresolvedRelation {
                field: field.name.clone(),
            }
            .into()),
        };
    }
    Ok(field.coerce(raw.clone())?)
}

fn json_value(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::Bytes(b) => JsonValue::String(STANDARD.encode(b)),
        Value::Timestamp(t) => JsonValue::String(t.to_string()),
        Value::Ref(r) => JsonValue::String(r.to_string()),
        Value::RefSet(refs) => {
            JsonValue::Array(refs.iter().map(|r| JsonValue::String(r.to_string())).collect())
        }
    }
}
