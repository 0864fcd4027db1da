//! Runtime value types and named coercion functions.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

use crate::types::ScalarType;
use crate::Error;

/// A reference to a persisted record of another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRef {
    /// Target entity name.
    pub entity: String,
    /// Primary key of the referenced record.
    pub key: i64,
}

impl RecordRef {
    /// Create a new record reference.
    pub fn new(entity: impl Into<String>, key: i64) -> Self {
        Self {
            entity: entity.into(),
            key,
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity, self.key)
    }
}

/// A runtime value held by an entity field or supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Reference to a single related record.
    Ref(RecordRef),
    /// References to a set of related records.
    RefSet(Vec<RecordRef>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is the literal empty string.
    pub fn is_empty_str(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    /// Human-readable kind name, used in coercion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
            Value::Ref(_) => "ref",
            Value::RefSet(_) => "ref set",
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bytes reference.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Try to get as a record reference.
    pub fn as_ref_value(&self) -> Option<&RecordRef> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<RecordRef> for Value {
    fn from(v: RecordRef) -> Self {
        Value::Ref(v)
    }
}

impl From<Vec<RecordRef>> for Value {
    fn from(v: Vec<RecordRef>) -> Self {
        Value::RefSet(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

/// Dispatch a raw value to the named coercion function for a scalar type.
///
/// Callers handle the empty-string-verbatim rule before dispatching.
pub fn coerce_scalar(field: &str, scalar: ScalarType, raw: Value) -> Result<Value, Error> {
    match scalar {
        ScalarType::Bool => coerce_bool(field, raw),
        ScalarType::Int => coerce_int(field, raw),
        ScalarType::Float => coerce_float(field, raw),
        ScalarType::String => coerce_string(field, raw),
        ScalarType::Bytes => coerce_bytes(field, raw),
        ScalarType::Timestamp => coerce_timestamp(field, raw),
    }
}

/// Coerce into a boolean. Accepts booleans and the strings "true"/"false".
pub fn coerce_bool(field: &str, raw: Value) -> Result<Value, Error> {
    match raw {
        v @ Value::Bool(_) => Ok(v),
        Value::Str(s) => match s.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(coercion_error(field, "bool", Value::Str(s))),
        },
        other => Err(coercion_error(field, "bool", other)),
    }
}

/// Coerce into a 64-bit integer. Accepts integers and numeric strings.
pub fn coerce_int(field: &str, raw: Value) -> Result<Value, Error> {
    match raw {
        v @ Value::Int(_) => Ok(v),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| coercion_error(field, "int", Value::Str(s))),
        other => Err(coercion_error(field, "int", other)),
    }
}

/// Coerce into a float. Accepts floats, integers, and numeric strings.
pub fn coerce_float(field: &str, raw: Value) -> Result<Value, Error> {
    match raw {
        v @ Value::Float(_) => Ok(v),
        Value::Int(i) => Ok(Value::Float(i as f64)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| coercion_error(field, "float", Value::Str(s))),
        other => Err(coercion_error(field, "float", other)),
    }
}

/// Coerce into a string. Scalars stringify; references do not.
pub fn coerce_string(field: &str, raw: Value) -> Result<Value, Error> {
    match raw {
        v @ Value::Str(_) => Ok(v),
        Value::Bool(b) => Ok(Value::Str(b.to_string())),
        Value::Int(i) => Ok(Value::Str(i.to_string())),
        Value::Float(f) => Ok(Value::Str(f.to_string())),
        other => Err(coercion_error(field, "string", other)),
    }
}

/// Coerce into bytes. Strings convert to their UTF-8 bytes.
pub fn coerce_bytes(field: &str, raw: Value) -> Result<Value, Error> {
    match raw {
        v @ Value::Bytes(_) => Ok(v),
        Value::Str(s) => Ok(Value::Bytes(s.into_bytes())),
        other => Err(coercion_error(field, "bytes", other)),
    }
}

/// Coerce into a timestamp. Accepts timestamps, RFC 3339 strings, and
/// epoch seconds.
pub fn coerce_timestamp(field: &str, raw: Value) -> Result<Value, Error> {
    match raw {
        v @ Value::Timestamp(_) => Ok(v),
        Value::Int(secs) => Utc
            .timestamp_opt(secs, 0)
            .single()
            .map(Value::Timestamp)
            .ok_or_else(|| coercion_error(field, "timestamp", Value::Int(secs))),
        Value::Str(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Value::Timestamp(dt.with_timezone(&Utc)))
            .map_err(|_| coercion_error(field, "timestamp", Value::Str(s))),
        other => Err(coercion_error(field, "timestamp", other)),
    }
}

fn coercion_error(field: &str, expected: &'static str, got: Value) -> Error {
    let got = match &got {
        Value::Str(s) => format!("string '{}'", s),
        other => other.kind().to_string(),
    };
    Error::Coercion {
        field: field.to_string(),
        expected,
        got,
    }
}
