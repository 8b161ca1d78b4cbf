//! Key and path existence checks.

use super::parser::PathParser;
use super::PathSpec;
use crate::error::Result;
use crate::value::{Array, Key, Value};

/// Checks whether `key` exists in `array`.
///
/// `key` may be a single key or a list of keys describing a nested path.
/// Without case sensitivity more than one key may match a path segment;
/// every matching branch is explored until one complete path is found.
pub fn key_exists(array: &Array, key: impl Into<PathSpec>, case_sensitive: bool) -> Result<bool> {
    let keys = key.into().to_keys(None)?;
    Ok(keys_exist(array, &keys, case_sensitive))
}

/// Checks whether a delimited `path` exists in `array`; see [`key_exists`].
pub fn path_exists(
    array: &Array,
    path: impl Into<PathSpec>,
    case_sensitive: bool,
    delimiter: &str,
) -> Result<bool> {
    let parser = PathParser::with_delimiter(delimiter)?;
    let keys = path.into().to_keys(Some(&parser))?;
    Ok(keys_exist(array, &keys, case_sensitive))
}

fn keys_exist(array: &Array, keys: &[Key], case_sensitive: bool) -> bool {
    match keys {
        [] => false,
        [last] => matching_keys(array, last, case_sensitive).next().is_some(),
        [first, rest @ ..] => matching_keys(array, first, case_sensitive).any(|k| {
            matches!(array.get(k), Some(Value::Array(inner)) if keys_exist(inner, rest, case_sensitive))
        }),
    }
}

fn matching_keys<'a>(
    array: &'a Array,
    key: &'a Key,
    case_sensitive: bool,
) -> impl Iterator<Item = &'a Key> + 'a {
    array.keys().filter(move |k| {
        if case_sensitive {
            *k == key
        } else {
            k.eq_ignore_ascii_case(key)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;

    fn array(s: &str) -> Array {
        from_json(s).unwrap().as_array().cloned().unwrap()
    }

    #[test]
    fn test_key_exists_case() {
        let data = array(r#"{"B": 2}"#);
        assert!(key_exists(&data, "b", false).unwrap());
        assert!(!key_exists(&data, "b", true).unwrap());
        assert!(key_exists(&data, "B", true).unwrap());
    }

    #[test]
    fn test_key_exists_with_null_value() {
        let data = array(r#"{"a": null}"#);
        assert!(key_exists(&data, "a", true).unwrap());
    }

    #[test]
    fn test_integer_keys() {
        let data = array(r#"["x", "y"]"#);
        assert!(key_exists(&data, 1i64, true).unwrap());
        assert!(key_exists(&data, "1", false).unwrap());
        assert!(!key_exists(&data, 2i64, true).unwrap());
    }

    #[test]
    fn test_nested_key_list() {
        let data = array(r#"{"a": {"b": {"c": 1}}, "s": "scalar"}"#);
        assert!(key_exists(&data, ["a", "b", "c"], true).unwrap());
        assert!(!key_exists(&data, ["a", "b", "d"], true).unwrap());
        assert!(!key_exists(&data, ["s", "x"], true).unwrap());
    }

    #[test]
    fn test_case_insensitive_branching() {
        // Both "A" and "a" match the first segment; only the second branch
        // holds the full path.
        let data = array(r#"{"A": {"x": 1}, "a": {"y": 2}}"#);
        assert!(key_exists(&data, ["a", "Y"], false).unwrap());
        assert!(key_exists(&data, ["A", "X"], false).unwrap());
        assert!(!key_exists(&data, ["a", "x"], true).unwrap());
        assert!(!key_exists(&data, ["a", "z"], false).unwrap());
    }

    #[test]
    fn test_path_exists() {
        let data = array(r#"{"Key1": {"Key2": {"key3": "value"}}, "a.b": 1}"#);
        assert!(path_exists(&data, "Key1.Key2.key3", true, ".").unwrap());
        assert!(!path_exists(&data, "key1.key2.key3", true, ".").unwrap());
        assert!(path_exists(&data, "key1.key2.KEY3", false, ".").unwrap());
        assert!(path_exists(&data, "Key1/Key2", true, "/").unwrap());
        assert!(path_exists(&data, "a\\.b", true, ".").unwrap());
    }

    #[test]
    fn test_empty_path_does_not_exist() {
        let data = array(r#"{"a": 1}"#);
        assert!(!key_exists(&data, PathSpec::root(), true).unwrap());
    }
}
