//! User accounts, with password or OAuth login.

use std::sync::OnceLock;

use curio_schema::{EntityDef, FieldDef, RecordRef, ScalarType, Value};
use tracing::warn;

use crate::convert;
use crate::lifecycle::Lifecycle;
use crate::password;
use crate::record::Record;
use crate::stamp::Stamps;
use crate::Error;

/// A user account.
///
/// Must hold email and password, or at least one OAuth link; the invariant
/// is checked by the lifecycle hooks on both insert and update. The
/// password field stores either the empty sentinel or a PBKDF2-SHA256
/// hash, never plaintext.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    /// Primary key, assigned by the storage layer.
    pub id: Option<i64>,
    /// Creation/modification timestamps.
    pub stamps: Stamps,
    /// Display name.
    pub name: String,
    /// Login email, unique when present.
    pub email: Option<String>,
    /// Unique handle.
    pub username: Option<String>,
    /// Hashed password, or empty when unset.
    pub password: String,
    /// Facebook account id.
    pub fbid: Option<String>,
    /// Google account id.
    pub ggid: Option<String>,
    /// Linked OAuth records.
    pub oauth: Vec<RecordRef>,
}

impl User {
    /// Set the password, hashing plaintext on the way in.
    pub fn set_password(&mut self, raw: &str) -> Result<(), Error> {
        self.password = password::normalize(raw)?;
        Ok(())
    }

    /// Check a login attempt against the stored hash.
    pub fn check_password(&self, plaintext: &str) -> bool {
        !self.password.is_empty() && password::verify(plaintext, &self.password)
    }

    fn check_login_method(&self) -> Result<(), Error> {
        let has_credentials =
            self.email.as_deref().is_some_and(|e| !e.is_empty()) && !self.password.is_empty();
        if has_credentials || !self.oauth.is_empty() {
            Ok(())
        } else {
            warn!(user = ?self.id, "rejecting user without a login method");
            Err(Error::InvalidAccountState)
        }
    }
}

impl Record for User {
    fn entity_def() -> &'static EntityDef {
        static DEF: OnceLock<EntityDef> = OnceLock::new();
        DEF.get_or_init(|| {
            EntityDef::new("User")
                .with_field(FieldDef::optional("name", ScalarType::String))
                .with_field(
                    FieldDef::optional("email", ScalarType::String)
                        .with_unique()
                        .with_index()
                        .with_nullable(),
                )
                .with_field(
                    FieldDef::optional("username", ScalarType::String)
                        .with_unique()
                        .with_index()
                        .with_nullable(),
                )
                .with_field(FieldDef::password("password"))
                .with_field(
                    FieldDef::optional("fbid", ScalarType::String)
                        .with_unique()
                        .with_index()
                        .with_nullable(),
                )
                .with_field(
                    FieldDef::optional("ggid", ScalarType::String)
                        .with_unique()
                        .with_index()
                        .with_nullable(),
                )
                .with_field(FieldDef::many("oauth", "OAuth"))
        })
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "created" => Some(self.stamps.created.into()),
            "updated" => Some(self.stamps.updated.into()),
            "name" => Some(self.name.clone().into()),
            "email" => Some(self.email.clone().into()),
            "username" => Some(self.username.clone().into()),
            "password" => Some(self.password.clone().into()),
            "fbid" => Some(self.fbid.clone().into()),
            "ggid" => Some(self.ggid.clone().into()),
            "oauth" => Some(self.oauth.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), Error> {
        match field {
            "name" => self.name = convert::into_string(field, value)?,
            "email" => self.email = convert::into_opt_string(field, value)?,
            "username" => self.username = convert::into_opt_string(field, value)?,
            "password" => {
                let raw = convert::into_string(field, value)?;
                self.set_password(&raw)?;
            }
            "fbid" => self.fbid = convert::into_opt_string(field, value)?,
            "ggid" => self.ggid = convert::into_opt_string(field, value)?,
            "oauth" => self.oauth = convert::into_refs(field, value)?,
            _ => {
                return Err(curio_schema::Error::UnknownField {
                    entity: "User".into(),
                    field: field.into(),
                }
                .into())
            }
        }
        Ok(())
    }
}

impl Lifecycle for User {
    fn before_insert(&mut self) -> Result<(), Error> {
        self.stamps.stamp_insert();
        self.check_login_method()
    }

    fn before_update(&mut self) -> Result<(), Error> {
        self.stamps.stamp_update();
        self.check_login_method()
    }
}
