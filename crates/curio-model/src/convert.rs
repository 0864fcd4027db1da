//! Conversions from runtime values into typed entity fields.
//!
//! Entity `set` implementations receive values that already passed the
//! declared-type coercion; these helpers finish the trip into the concrete
//! Rust field types and reject anything that slipped past.

use curio_schema::{Error as SchemaError, RecordRef, Value};

use crate::Error;

fn mismatch(field: &str, expected: &'static str, got: &Value) -> Error {
    Error::Schema(SchemaError::Coercion {
        field: field.to_string(),
        expected,
        got: got.kind().to_string(),
    })
}

pub(crate) fn into_string(field: &str, value: Value) -> Result<String, Error> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(mismatch(field, "string", &other)),
    }
}

pub(crate) fn into_opt_string(field: &str, value: Value) -> Result<Option<String>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::Str(s) => Ok(Some(s)),
        other => Err(mismatch(field, "string", &other)),
    }
}

/// An explicit empty-string clear on a numeric field maps to `None`;
/// the Rust field cannot hold the cleared-string representation.
pub(crate) fn into_opt_int(field: &str, value: Value) -> Result<Option<i64>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::Str(s) if s.is_empty() => Ok(None),
        Value::Int(i) => Ok(Some(i)),
        other => Err(mismatch(field, "int", &other)),
    }
}

pub(crate) fn into_bytes(field: &str, value: Value) -> Result<Vec<u8>, Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Bytes(b) => Ok(b),
        Value::Str(s) => Ok(s.into_bytes()),
        other => Err(mismatch(field, "bytes", &other)),
    }
}

pub(crate) fn into_ref(field: &str, value: Value) -> Result<RecordRef, Error> {
    match value {
        Value::Ref(r) => Ok(r),
        other => Err(mismatch(field, "record reference", &other)),
    }
}

pub(crate) fn into_refs(field: &str, value: Value) -> Result<Vec<RecordRef>, Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Str(s) if s.is_empty() => Ok(Vec::new()),
        Value::Ref(r) => Ok(vec![r]),
        Value::RefSet(refs) => Ok(refs),
        other => Err(mismatch(field, "record reference set", &other)),
    }
}
