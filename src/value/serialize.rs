//! Serde support for values.
//!
//! A list array (keys exactly `0..n` in order) serializes as a sequence and
//! any other array as a map with stringified keys. Deserialization keeps the
//! document order of map entries and normalizes their keys.

use super::array::Array;
use super::value::Value;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(a) => a.serialize(serializer),
            Value::Object(o) => Err(ser::Error::custom(format!(
                "cannot serialize object of class {}",
                o.class_name()
            ))),
            Value::Marker(m) => Err(ser::Error::custom(format!(
                "cannot serialize merge marker {:?}",
                m
            ))),
        }
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON/YAML value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Int(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        Ok(match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(u as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Float(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            array.push(value);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut array = Array::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<Value>()? {
            let key = key.to_key().map_err(de::Error::custom)?;
            let value = map.next_value::<Value>()?;
            array.insert(key, value);
        }
        Ok(Value::Array(array))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Array {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(array) => Ok(array),
            other => Err(de::Error::custom(format!(
                "expected an array or map, found {}",
                other.type_name()
            ))),
        }
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize a value to indented JSON.
pub fn to_json_pretty(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::Marker;
    use crate::value::Key;

    #[test]
    fn test_json_keeps_document_order() {
        let value = from_json(r#"{"zeta": 1, "alpha": 2, "5": 3}"#).unwrap();
        let array = value.as_array().unwrap();
        let keys: Vec<_> = array.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("zeta"), Key::from("alpha"), Key::Int(5)]);
    }

    #[test]
    fn test_json_roundtrip() {
        let json = r#"{"name":"Yii","features":["mvc","gii"],"ratio":0.5,"flag":null}"#;
        let value = from_json(json).unwrap();
        assert_eq!(to_json(&value).unwrap(), json);
    }

    #[test]
    fn test_sparse_list_serializes_as_map() {
        let mut array = Array::new();
        array.insert(1i64, Value::from("a"));
        assert_eq!(to_json(&Value::Array(array)).unwrap(), r#"{"1":"a"}"#);
    }

    #[test]
    fn test_yaml_parsing() {
        let value = from_yaml("name: app\nports:\n  - 80\n  - 443\n").unwrap();
        assert_eq!(
            value,
            from_json(r#"{"name":"app","ports":[80,443]}"#).unwrap()
        );
    }

    #[test]
    fn test_markers_cannot_be_serialized() {
        assert!(to_json(&Value::Marker(Marker::Unset)).is_err());
    }
}
