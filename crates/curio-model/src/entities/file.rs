//! Uploaded files, deduplicated by content hash.

use std::sync::OnceLock;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use curio_schema::{EntityDef, FieldDef, ScalarType, Value};
use md5::{Digest, Md5};
use tracing::debug;

use crate::convert;
use crate::lifecycle::Lifecycle;
use crate::record::Record;
use crate::stamp::Stamps;
use crate::Error;

/// An uploaded file.
///
/// `hash` is derived from `blob` by the lifecycle hooks on every insert
/// and update: URL-safe base64 of the MD5 digest, or absent when the blob
/// is empty. The storage layer's unique index on `hash` is what
/// deduplicates content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredFile {
    /// Primary key, assigned by the storage layer.
    pub id: Option<i64>,
    /// Creation/modification timestamps.
    pub stamps: Stamps,
    /// Original file name.
    pub name: String,
    /// Raw content bytes.
    pub blob: Vec<u8>,
    /// Content digest, derived.
    pub hash: Option<String>,
    /// MIME type, when known.
    pub ty: Option<String>,
}

impl StoredFile {
    /// Recompute the content hash from the blob.
    pub fn rehash(&mut self) {
        if self.blob.is_empty() {
            self.hash = None;
        } else {
            let digest = Md5::digest(&self.blob);
            self.hash = Some(URL_SAFE.encode(digest));
            debug!(name = %self.name, hash = ?self.hash, "rehashed file content");
        }
    }
}

impl Record for StoredFile {
    fn entity_def() -> &'static EntityDef {
        static DEF: OnceLock<EntityDef> = OnceLock::new();
        DEF.get_or_init(|| {
            EntityDef::new("File")
                .with_field(FieldDef::required("name", ScalarType::String).with_index())
                .with_field(FieldDef::optional("blob", ScalarType::Bytes))
                .with_field(
                    FieldDef::optional("hash", ScalarType::String)
                        .with_unique()
                        .with_index()
                        .with_nullable(),
                )
                .with_field(FieldDef::optional("type", ScalarType::String).with_nullable())
        })
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "created" => Some(self.stamps.created.into()),
            "updated" => Some(self.stamps.updated.into()),
            "name" => Some(self.name.clone().into()),
            "blob" => Some(self.blob.clone().into()),
            "hash" => Some(self.hash.clone().into()),
            "type" => Some(self.ty.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), Error> {
        match field {
            "name" => self.name = convert::into_string(field, value)?,
            "blob" => self.blob = convert::into_bytes(field, value)?,
            "hash" => self.hash = convert::into_opt_string(field, value)?,
            "type" => self.ty = convert::into_opt_string(field, value)?,
            _ => {
                return Err(curio_schema::Error::UnknownField {
                    entity: "File".into(),
                    field: field.into(),
                }
                .into())
            }
        }
        Ok(())
    }
}

impl Lifecycle for StoredFile {
    fn before_insert(&mut self) -> Result<(), Error> {
        self.stamps.stamp_insert();
        self.rehash();
        Ok(())
    }

    fn before_update(&mut self) -> Result<(), Error> {
        self.stamps.stamp_update();
        self.rehash();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_hash_matches_known_digest() {
        let mut file = StoredFile {
            name: "a.txt".into(),
            blob: b"abc".to_vec(),
            ..Default::default()
        };
        file.before_insert().unwrap();

        // urlsafe_b64encode(md5(b"abc"))
        assert_eq!(file.hash.as_deref(), Some("kAFQmDzST7DWlj99KOF_cg=="));
    }

    #[test]
    fn test_empty_blob_clears_hash() {
        let mut file = StoredFile {
            name: "a.txt".into(),
            blob: b"abc".to_vec(),
            ..Default::default()
        };
        file.before_insert().unwrap();
        assert!(file.hash.is_some());

        file.blob.clear();
        file.before_update().unwrap();
        assert_eq!(file.hash, None);
    }

    #[test]
    fn test_rehash_runs_on_update() {
        let mut file = StoredFile {
            name: "a.txt".into(),
            blob: b"abc".to_vec(),
            ..Default::default()
        };
        file.before_insert().unwrap();
        let first = file.hash.clone();

        file.blob = b"abcd".to_vec();
        file.before_update().unwrap();
        assert_ne!(file.hash, first);
    }

    #[test]
    fn test_from_map_requires_name() {
        let data = HashMap::new();
        let err = StoredFile::from_map(&data, None, &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(curio_schema::Error::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_from_map_accepts_blob_bytes() {
        let mut data = HashMap::new();
        data.insert("name".to_string(), Value::Str("a.txt".into()));
        data.insert("blob".to_string(), Value::Bytes(b"abc".to_vec()));
        data.insert("type".to_string(), Value::Str("text/plain".into()));

        let file = StoredFile::from_map(&data, None, &[]).unwrap();
        assert_eq!(file.blob, b"abc");
        assert_eq!(file.ty.as_deref(), Some("text/plain"));
        assert_eq!(file.hash, None); // derived only by hooks
    }
}
