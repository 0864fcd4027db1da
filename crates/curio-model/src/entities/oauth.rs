//! OAuth provider links, owned by a user.

use std::sync::OnceLock;

use curio_schema::{EntityDef, FieldDef, RecordRef, ScalarType, Value};

use crate::convert;
use crate::lifecycle::Lifecycle;
use crate::record::Record;
use crate::stamp::Stamps;
use crate::Error;

/// A link between a user account and an external OAuth identity.
///
/// `puid` is the provider-scoped user id, unique across providers. Every
/// link belongs to exactly one user; cascade on owner deletion is the
/// storage engine's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuth {
    /// Primary key, assigned by the storage layer.
    pub id: Option<i64>,
    /// Creation/modification timestamps.
    pub stamps: Stamps,
    /// Provider name, e.g. "google".
    pub provider: String,
    /// Provider user id.
    pub puid: String,
    /// Current access token.
    pub access_token: String,
    /// Refresh token, when the provider issues one.
    pub refresh_token: String,
    /// Owning user.
    pub user: Option<RecordRef>,
}

impl Record for OAuth {
    fn entity_def() -> &'static EntityDef {
        static DEF: OnceLock<EntityDef> = OnceLock::new();
        DEF.get_or_init(|| {
            EntityDef::new("OAuth")
                .with_field(FieldDef::required("provider", ScalarType::String).with_index())
                .with_field(
                    FieldDef::required("puid", ScalarType::String)
                        .with_unique()
                        .with_index(),
                )
                .with_field(FieldDef::optional("access_token", ScalarType::String))
                .with_field(FieldDef::optional("refresh_token", ScalarType::String))
                .with_field(FieldDef::relation("user", "User"))
        })
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "created" => Some(self.stamps.created.into()),
            "updated" => Some(self.stamps.updated.into()),
            "provider" => Some(self.provider.clone().into()),
            "puid" => Some(self.puid.clone().into()),
            "access_token" => Some(self.access_token.clone().into()),
            "refresh_token" => Some(self.refresh_token.clone().into()),
            "user" => Some(self.user.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), Error> {
        match field {
            "provider" => self.provider = convert::into_string(field, value)?,
            "puid" => self.puid = convert::into_string(field, value)?,
            "access_token" => self.access_token = convert::into_string(field, value)?,
            "refresh_token" => self.refresh_token = convert::into_string(field, value)?,
            "user" => self.user = Some(convert::into_ref(field, value)?),
            _ => {
                return Err(curio_schema::Error::UnknownField {
                    entity: "OAuth".into(),
                    field: field.into(),
                }
                .into())
            }
        }
        Ok(())
    }
}

impl Lifecycle for OAuth {
    fn before_insert(&mut self) -> Result<(), Error> {
        self.stamps.stamp_insert();
        Ok(())
    }

    fn before_update(&mut self) -> Result<(), Error> {
        self.stamps.stamp_update();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_map_requires_owner() {
        let mut data = HashMap::new();
        data.insert("provider".to_string(), Value::Str("google".into()));
        data.insert("puid".to_string(), Value::Str("g-123".into()));

        let err = OAuth::from_map(&data, None, &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(curio_schema::Error::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_from_map_resolves_owner_through_handler() {
        let mut data = HashMap::new();
        data.insert("provider".to_string(), Value::Str("google".into()));
        data.insert("puid".to_string(), Value::Str("g-123".into()));
        data.insert("user".to_string(), Value::Int(7));

        let handler = |target: &str, raw: &Value| -> Result<Value, Error> {
            assert_eq!(target, "User");
            Ok(Value::Ref(RecordRef::new(target, raw.as_i64().unwrap())))
        };

        let oauth = OAuth::from_map(&data, Some(&handler), &[]).unwrap();
        assert_eq!(oauth.user, Some(RecordRef::new("User", 7)));
        assert_eq!(oauth.provider, "google");
        assert_eq!(oauth.access_token, "");
    }

    #[test]
    fn test_hooks_stamp_timestamps() {
        let mut oauth = OAuth::default();
        oauth.before_insert().unwrap();
        assert!(oauth.stamps.created.is_some());

        oauth.before_update().unwrap();
        assert!(oauth.stamps.updated >= oauth.stamps.created);
    }
}
