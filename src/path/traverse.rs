//! Reading values from nested arrays and objects.

use super::parser::PathParser;
use super::PathSpec;
use crate::error::{Error, Result};
use crate::value::{Key, Value};
use std::borrow::Cow;

/// Retrieves the value at `path`, or `default` when it does not exist.
///
/// String segments are used as single keys; see [`get_by_path`] for the
/// delimited form. The root must be an array or an object. Walking stops
/// with `default` as soon as a key is missing or an intermediate value is
/// neither an array nor an object. Errors raised by objects propagate.
pub fn get(root: &Value, path: impl Into<PathSpec>, default: Value) -> Result<Value> {
    ensure_traversable(root)?;
    match path.into() {
        PathSpec::Getter(getter) => getter(root, default),
        spec => get_keys(root, &spec.to_keys(None)?, default),
    }
}

/// Retrieves the value at a delimited `path` such as `"user.address.city"`.
///
/// String segments are split with `delimiter` and the default escape
/// character; integer and explicit [`Key`] segments pass through. A literal
/// key in the root array equal to the whole path string takes precedence
/// over descending into the parsed segments.
pub fn get_by_path(
    root: &Value,
    path: impl Into<PathSpec>,
    default: Value,
    delimiter: &str,
) -> Result<Value> {
    ensure_traversable(root)?;
    let parser = PathParser::with_delimiter(delimiter)?;
    match path.into() {
        PathSpec::Getter(getter) => getter(root, default),
        spec => {
            if let (PathSpec::Str(s), Value::Array(array)) = (&spec, root) {
                if s.contains(parser.delimiter()) {
                    if let Some(value) = array.get(&Key::from(s.as_str())) {
                        return Ok(value.clone());
                    }
                }
            }
            get_keys(root, &spec.to_keys(Some(&parser))?, default)
        }
    }
}

fn ensure_traversable(root: &Value) -> Result<()> {
    match root {
        Value::Array(_) | Value::Object(_) => Ok(()),
        other => Err(Error::invalid_argument(format!(
            "cannot get a value from {}: an array or object is required",
            other.type_name()
        ))),
    }
}

pub(crate) fn get_keys(root: &Value, keys: &[Key], default: Value) -> Result<Value> {
    let Some((last, parents)) = keys.split_last() else {
        return Ok(default);
    };

    let mut current = Cow::Borrowed(root);
    for key in parents {
        let next = match current {
            Cow::Borrowed(value) => member(value, key)?,
            Cow::Owned(value) => member(&value, key)?.map(|v| Cow::Owned(v.into_owned())),
        };
        match next {
            Some(value) if value.is_array() || value.is_object() => current = value,
            _ => return Ok(default),
        }
    }

    Ok(member(&current, last)?.map_or(default, Cow::into_owned))
}

/// Looks up one key on an array or object.
///
/// On objects a key ending in `()` calls the named method; otherwise a
/// static property is tried before the instance property.
pub(crate) fn member<'a>(value: &'a Value, key: &Key) -> Result<Option<Cow<'a, Value>>> {
    match value {
        Value::Array(array) => Ok(array.get(key).map(Cow::Borrowed)),
        Value::Object(object) => {
            let name = key.to_string();
            if let Some(method) = name.strip_suffix("()") {
                return object.call_method(method).map(|v| Some(Cow::Owned(v)));
            }
            if let Some(value) = object.static_property(&name) {
                return Ok(Some(Cow::Owned(value)));
            }
            object.property(&name).map(|v| Some(Cow::Owned(v)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{from_json, Record};
    use pretty_assertions::assert_eq;

    fn fixture() -> Value {
        from_json(
            r#"{
                "id": "123",
                "data": "bar",
                "items": {"0": {"id": 1}, "1": {"id": 2}},
                "admin": {"firstname": "Qiang", "lastname": "Xue", "profile": {"city": "Moscow"}},
                "version": {"1.0": {"status": "released"}},
                "key.with.dots": "literal"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_get_single_key() {
        let data = fixture();
        assert_eq!(get(&data, "data", Value::Null).unwrap(), Value::from("bar"));
        assert_eq!(
            get(&data, "missing", Value::from("default")).unwrap(),
            Value::from("default")
        );
    }

    #[test]
    fn test_get_key_list() {
        let data = fixture();
        assert_eq!(
            get(&data, ["admin", "firstname"], Value::Null).unwrap(),
            Value::from("Qiang")
        );
        assert_eq!(
            get(&data, PathSpec::from(vec![PathSpec::from("items"), PathSpec::from(1i64), PathSpec::from("id")]), Value::Null).unwrap(),
            Value::Int(2)
        );
        assert_eq!(
            get(&data, ["admin", "firstname", "deeper"], Value::Int(0)).unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn test_get_does_not_parse_strings() {
        let data = fixture();
        assert_eq!(
            get(&data, "admin.firstname", Value::Null).unwrap(),
            Value::Null
        );
        assert_eq!(
            get(&data, "key.with.dots", Value::Null).unwrap(),
            Value::from("literal")
        );
    }

    #[test]
    fn test_get_by_path() {
        let data = fixture();
        assert_eq!(
            get_by_path(&data, "admin.profile.city", Value::Null, ".").unwrap(),
            Value::from("Moscow")
        );
        assert_eq!(
            get_by_path(&data, "items.0.id", Value::Null, ".").unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            get_by_path(&data, "version.1\\.0.status", Value::Null, ".").unwrap(),
            Value::from("released")
        );
        assert_eq!(
            get_by_path(&data, "admin/lastname", Value::Null, "/").unwrap(),
            Value::from("Xue")
        );
    }

    #[test]
    fn test_get_by_path_prefers_literal_key() {
        let data = fixture();
        assert_eq!(
            get_by_path(&data, "key.with.dots", Value::Null, ".").unwrap(),
            Value::from("literal")
        );
    }

    #[test]
    fn test_get_by_path_mixed_segments() {
        let data = fixture();
        let path = PathSpec::List(vec![
            PathSpec::from("admin.profile"),
            PathSpec::Key(Key::from("city")),
        ]);
        assert_eq!(
            get_by_path(&data, path, Value::Null, ".").unwrap(),
            Value::from("Moscow")
        );
    }

    #[test]
    fn test_float_keys() {
        let data = from_json(r#"{"3": "int", "3.01": "float"}"#).unwrap();
        assert_eq!(get(&data, 3.0, Value::Null).unwrap(), Value::from("int"));
        assert_eq!(get(&data, 3.01, Value::Null).unwrap(), Value::from("float"));
    }

    #[test]
    fn test_getter_closure() {
        let data = fixture();
        let getter = PathSpec::getter(|root, _default| {
            let first = get(root, ["admin", "firstname"], Value::Null)?;
            let last = get(root, ["admin", "lastname"], Value::Null)?;
            Ok(Value::from(format!(
                "{} {}",
                first.as_str().unwrap_or_default(),
                last.as_str().unwrap_or_default()
            )))
        });
        assert_eq!(
            get(&data, getter, Value::Null).unwrap(),
            Value::from("Qiang Xue")
        );
    }

    #[test]
    fn test_null_values_are_returned() {
        let data = from_json(r#"{"a": null}"#).unwrap();
        assert_eq!(get(&data, "a", Value::Int(1)).unwrap(), Value::Null);
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let err = get(&Value::from("scalar"), "a", Value::Null).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_object_members() {
        let post = Record::new("Post")
            .with_field("title", "Hello")
            .with_static("table", "posts")
            .with_method("author", |_| {
                Value::object(Record::new("User").with_field("name", "Alex"))
            });
        let root = Value::object(post);

        assert_eq!(get(&root, "title", Value::Null).unwrap(), Value::from("Hello"));
        assert_eq!(get(&root, "table", Value::Null).unwrap(), Value::from("posts"));
        assert_eq!(
            get_by_path(&root, "author().name", Value::Null, ".").unwrap(),
            Value::from("Alex")
        );
    }

    #[test]
    fn test_object_errors_propagate() {
        let root = Value::object(Record::new("Post"));
        assert_eq!(
            get(&root, "body", Value::Null),
            Err(Error::property_resolution("Post", "body"))
        );

        let dynamic = Value::object(Record::new("Magic").with_dynamic(|_| None));
        assert!(get(&dynamic, "anything", Value::Null)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_objects_nested_in_arrays() {
        let mut array = crate::value::Array::new();
        array.insert("post", Value::object(Record::new("Post").with_field("title", "T")));
        let root = Value::Array(array);
        assert_eq!(
            get_by_path(&root, "post.title", Value::Null, ".").unwrap(),
            Value::from("T")
        );
    }
}
