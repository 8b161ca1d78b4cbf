//! Writing and removing values in nested arrays.

use super::parser::PathParser;
use super::PathSpec;
use crate::error::{Error, Result};
use crate::value::{Array, Key, Value};

/// Writes `value` at `path`, creating intermediate arrays as needed.
///
/// An empty path replaces the root. A missing or null intermediate becomes
/// an empty array; any other non-array intermediate (including the root)
/// becomes a one-element list holding the old value before descending.
pub fn set(root: &mut Value, path: impl Into<PathSpec>, value: Value) -> Result<()> {
    let keys = path_keys(path.into(), None)?;
    set_keys(root, &keys, value);
    Ok(())
}

/// Writes `value` at a delimited `path`; see [`set`].
pub fn set_by_path(
    root: &mut Value,
    path: impl Into<PathSpec>,
    value: Value,
    delimiter: &str,
) -> Result<()> {
    let parser = PathParser::with_delimiter(delimiter)?;
    let keys = path_keys(path.into(), Some(&parser))?;
    set_keys(root, &keys, value);
    Ok(())
}

/// Removes the value at `path` and returns it, or returns `default` when
/// the path does not exist. Nothing is modified in that case.
pub fn remove(root: &mut Value, path: impl Into<PathSpec>, default: Value) -> Result<Value> {
    let keys = path_keys(path.into(), None)?;
    Ok(remove_keys(root, &keys, default))
}

/// Removes the value at a delimited `path`; see [`remove`].
pub fn remove_by_path(
    root: &mut Value,
    path: impl Into<PathSpec>,
    default: Value,
    delimiter: &str,
) -> Result<Value> {
    let parser = PathParser::with_delimiter(delimiter)?;
    let keys = path_keys(path.into(), Some(&parser))?;
    Ok(remove_keys(root, &keys, default))
}

/// Removes every entry strictly equal to `value` and returns the removed
/// entries keyed as they were.
pub fn remove_value(array: &mut Array, value: &Value) -> Array {
    let matching: Vec<Key> = array
        .iter()
        .filter(|(_, v)| *v == value)
        .map(|(k, _)| k.clone())
        .collect();

    let mut removed = Array::with_capacity(matching.len());
    for key in matching {
        if let Some(v) = array.remove(&key) {
            removed.insert(key, v);
        }
    }
    removed
}

fn path_keys(spec: PathSpec, parser: Option<&PathParser>) -> Result<Vec<Key>> {
    match spec {
        PathSpec::Getter(_) => Err(Error::invalid_argument(
            "a getter closure cannot address a location to modify",
        )),
        spec => spec.to_keys(parser),
    }
}

fn set_keys(root: &mut Value, keys: &[Key], value: Value) {
    let Some((last, parents)) = keys.split_last() else {
        *root = value;
        return;
    };

    let mut current = coerce_array(root);
    for key in parents {
        let slot = current.get_or_insert_with(key.clone(), || Value::Array(Array::new()));
        current = coerce_array(slot);
    }
    current.insert(last.clone(), value);
}

fn remove_keys(root: &mut Value, keys: &[Key], default: Value) -> Value {
    let Some((last, parents)) = keys.split_last() else {
        return default;
    };
    let Value::Array(current) = root else {
        return default;
    };

    let mut current = current;
    for key in parents {
        match current.get_mut(key) {
            Some(Value::Array(next)) => current = next,
            _ => return default,
        }
    }
    current.remove(last).unwrap_or(default)
}

/// Turns the slot into an array in place and returns it.
pub(crate) fn coerce_array(slot: &mut Value) -> &mut Array {
    if !slot.is_array() {
        let array = match std::mem::take(slot) {
            Value::Null => Array::new(),
            other => Array::from_values([other]),
        };
        *slot = Value::Array(array);
    }
    match slot {
        Value::Array(array) => array,
        _ => unreachable!("slot was just replaced with an array"),
    }
}
