//! Core value types and operations.

use super::array::Array;
use super::key::Key;
use super::object::ObjectAccess;
use crate::error::{Error, Result};
use crate::merge::Marker;
use std::sync::Arc;

/// Value is any cell stored in an [`Array`].
///
/// Besides scalars and nested arrays a cell may hold an object exposing
/// fields and methods through [`ObjectAccess`], or a merge [`Marker`] that
/// stands in for a value while arrays are merged.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(Arc<dyn ObjectAccess>),
    Marker(Marker),
}

impl Value {
    /// Wraps an object adapter.
    pub fn object(object: impl ObjectAccess + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Builds a list value keyed `0..n`.
    pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Array::from_values(values))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Value::Marker(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&dyn ObjectAccess> {
        match self {
            Value::Object(o) => Some(o.as_ref()),
            _ => None,
        }
    }

    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Value::Marker(m) => Some(m),
            _ => None,
        }
    }

    /// Returns a short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Marker(_) => "marker",
        }
    }

    /// Normalizes this value into an array key.
    ///
    /// Null becomes the empty string key, bools become `0`/`1`, floats and
    /// strings follow [`Key`] normalization. Arrays, objects and markers
    /// cannot be used as keys.
    pub fn to_key(&self) -> Result<Key> {
        match self {
            Value::Null => Ok(Key::Str(String::new())),
            Value::Bool(b) => Ok(Key::from(*b)),
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Float(f) => Ok(Key::from_f64(*f)),
            Value::String(s) => Ok(Key::from(s.as_str())),
            other => Err(Error::invalid_argument(format!(
                "a value of type {} cannot be used as an array key",
                other.type_name()
            ))),
        }
    }
}

impl PartialEq for Value {
    /// Strict equality: values of different variants are never equal,
    /// arrays compare entry by entry in order, objects compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Value::Marker(a), Value::Marker(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::list(values)
    }
}

impl From<Marker> for Value {
    fn from(m: Marker) -> Self {
        Value::Marker(m)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        match k {
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::String(s),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
