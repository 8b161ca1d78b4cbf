//! Indexing, grouping and mapping lists of arrays or objects.
//!
//! Every function reads element values with [`get`], so a key may be a
//! single [`Key`], a list of keys, or a [`PathSpec::getter`] closure.
//! Elements must be arrays or objects.

use crate::error::{Error, Result};
use crate::path::{coerce_array, get, PathSpec};
use crate::value::{Array, Value};

/// Indexes `elements` by the value at `key`, nested under `groups`.
///
/// Each group adds one level keyed by the element's value for that group.
/// With a `key`, the element is stored under its key value on the innermost
/// level, later elements overwriting earlier ones; elements whose key value
/// is null are skipped. Without a `key`, elements are appended to the
/// innermost level, and nothing is stored when `groups` is empty.
///
/// ```
/// use array_helper::index::index;
/// use array_helper::value::from_json;
///
/// let rows = from_json(r#"[{"id": "a", "v": 1}, {"id": "b", "v": 2}]"#).unwrap();
/// let indexed = index(rows.as_array().unwrap(), Some("id".into()), &[]).unwrap();
/// assert_eq!(indexed.keys().map(|k| k.to_string()).collect::<Vec<_>>(), ["a", "b"]);
/// ```
pub fn index(elements: &Array, key: Option<PathSpec>, groups: &[PathSpec]) -> Result<Array> {
    let mut result = Array::new();
    for element in elements.values() {
        let mut level = &mut result;
        for group in groups {
            let group_key = get(element, group.clone(), Value::Null)?.to_key()?;
            let slot = level.get_or_insert_with(group_key, || Value::Array(Array::new()));
            level = coerce_array(slot);
        }

        match &key {
            None => {
                if !groups.is_empty() {
                    append(level, element.clone())?;
                }
            }
            Some(key) => {
                let value = get(element, key.clone(), Value::Null)?;
                if !value.is_null() {
                    level.insert(value.to_key()?, element.clone());
                }
            }
        }
    }
    Ok(result)
}

/// Groups `elements` by the values at `groups`, one level per group.
pub fn group(elements: &Array, groups: &[PathSpec]) -> Result<Array> {
    index(elements, None, groups)
}

/// Builds a key-value map from the values at `from` and `to`, optionally
/// nested under the value at `group`.
pub fn map(
    elements: &Array,
    from: impl Into<PathSpec>,
    to: impl Into<PathSpec>,
    group: Option<PathSpec>,
) -> Result<Array> {
    let from = from.into();
    let to = to.into();
    let mut result = Array::new();
    for element in elements.values() {
        let key = get(element, from.clone(), Value::Null)?.to_key()?;
        let value = get(element, to.clone(), Value::Null)?;
        match &group {
            Some(group) => {
                let group_key = get(element, group.clone(), Value::Null)?.to_key()?;
                let slot = result.get_or_insert_with(group_key, || Value::Array(Array::new()));
                coerce_array(slot).insert(key, value);
            }
            None => {
                result.insert(key, value);
            }
        }
    }
    Ok(result)
}

/// Collects the value at `name` from every element.
///
/// With `keep_keys` the result reuses the keys of `elements`, otherwise the
/// values are numbered from zero.
pub fn get_column(elements: &Array, name: impl Into<PathSpec>, keep_keys: bool) -> Result<Array> {
    let name = name.into();
    let mut result = Array::with_capacity(elements.len());
    for (key, element) in elements {
        let value = get(element, name.clone(), Value::Null)?;
        if keep_keys {
            result.insert(key.clone(), value);
        } else {
            append(&mut result, value)?;
        }
    }
    Ok(result)
}

fn append(array: &mut Array, value: Value) -> Result<()> {
    match array.push(value) {
        Some(_) => Ok(()),
        None => Err(Error::invalid_argument(
            "cannot append: the next integer key is already occupied",
        )),
    }
}
