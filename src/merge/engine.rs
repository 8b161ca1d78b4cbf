//! The fold shared by the inline and collection merge APIs.

use super::marker::Marker;
use super::modifier::MergeStrategy;
use crate::value::{Array, Key, Value};
use tracing::{trace, warn};

/// How integer-keyed entries of an incoming array are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Entries keep their own keys.
    Preserve,
    /// Entries are appended at the next free index unless an equal value
    /// is already stored under an integer key.
    Append,
}

/// Whole-array rewrites requested by markers, run once a level is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ReverseValues,
    RemoveKeys,
}

/// Folds the inputs left to right into one array.
///
/// The first input seeds the accumulator with its keys intact. Each later
/// input is absorbed with the default rules, or with the reverse-block
/// rules when its strategy asks for it or it carries a
/// [`Marker::ReverseBlockMerge`].
pub(crate) fn fold(inputs: impl IntoIterator<Item = (Array, MergeStrategy)>) -> Array {
    let mut inputs = inputs.into_iter();
    let mut deferred = Vec::new();

    let Some((first, _)) = inputs.next() else {
        return Array::new();
    };
    let mut acc = Array::new();
    absorb(&mut acc, strip_reverse_marker(first).0, Placement::Preserve, &mut deferred);

    for (index, (next, strategy)) in inputs.enumerate() {
        let (next, marked) = strip_reverse_marker(next);
        if marked || strategy == MergeStrategy::ReverseBlock {
            trace!(input = index + 1, "reverse block merge");
            acc = reverse_block(acc, next, &mut deferred);
        } else {
            absorb(&mut acc, next, Placement::Append, &mut deferred);
        }
    }

    finish(acc, deferred)
}

/// Resolves the markers of a single array, keeping its keys.
pub(crate) fn settle(array: Array) -> Array {
    let mut deferred = Vec::new();
    let mut out = Array::with_capacity(array.len());
    absorb(&mut out, strip_reverse_marker(array).0, Placement::Preserve, &mut deferred);
    finish(out, deferred)
}

fn settle_value(value: Value) -> Value {
    match value {
        Value::Array(array) => Value::Array(settle(array)),
        other => other,
    }
}

fn absorb(acc: &mut Array, next: Array, placement: Placement, deferred: &mut Vec<Deferred>) {
    for (key, value) in next {
        let value = match value {
            Value::Marker(marker) => {
                apply_marker(acc, key, marker, deferred);
                continue;
            }
            other => other,
        };

        if placement == Placement::Append && key.is_int() {
            let value = settle_value(value);
            if !acc.contains_indexed_value(&value) {
                append(acc, value);
            }
            continue;
        }

        if let Value::Array(incoming) = value {
            if let Some(Value::Array(existing)) = acc.get_mut(&key) {
                merge_nested(existing, incoming);
                continue;
            }
            acc.insert(key, Value::Array(settle(incoming)));
            continue;
        }

        acc.insert(key, value);
    }
}

fn merge_nested(existing: &mut Array, incoming: Array) {
    let mut deferred = Vec::new();
    let (incoming, marked) = strip_reverse_marker(incoming);
    let merged = if marked {
        reverse_block(std::mem::take(existing), incoming, &mut deferred)
    } else {
        let mut merged = std::mem::take(existing);
        absorb(&mut merged, incoming, Placement::Append, &mut deferred);
        merged
    };
    *existing = finish(merged, deferred);
}

/// Combines `earlier` and `later` so that the entries of `later` come
/// first, followed by entries found only in `earlier`. Conflicting scalars
/// keep the value from `later`; arrays under a common key are combined the
/// same way, recursively, before the markers of `later` are resolved, so
/// keys unset or replaced at any depth are never refilled from `earlier`.
/// `earlier` must not hold markers.
fn reverse_block(mut earlier: Array, later: Array, deferred: &mut Vec<Deferred>) -> Array {
    let pinned: Vec<Key> = later
        .iter()
        .filter(|(_, v)| v.as_marker().is_some_and(Marker::pins_key))
        .map(|(k, _)| k.clone())
        .collect();

    let mut combined = Vec::new();
    let mut staged = Array::with_capacity(later.len());
    for (key, value) in later {
        let value = match value {
            Value::Array(later_inner) if !key.is_int() => match earlier.get_mut(&key) {
                Some(Value::Array(earlier_inner)) => {
                    let (later_inner, _) = strip_reverse_marker(later_inner);
                    let mut nested = Vec::new();
                    let merged = reverse_block(std::mem::take(earlier_inner), later_inner, &mut nested);
                    combined.push(key.clone());
                    Value::Array(finish(merged, nested))
                }
                _ => Value::Array(later_inner),
            },
            other => other,
        };
        staged.insert(key, value);
    }

    let mut result = Array::with_capacity(staged.len() + earlier.len());
    absorb(&mut result, staged, Placement::Preserve, deferred);

    for (key, value) in earlier {
        if key.is_int() {
            if !result.contains_indexed_value(&value) {
                append(&mut result, value);
            }
            continue;
        }
        if pinned.contains(&key) || combined.contains(&key) {
            continue;
        }
        if !result.contains_key(&key) {
            result.insert(key, value);
        }
    }
    result
}

/// Appends at the next free index. When the integer key space is
/// exhausted the value is dropped.
fn append(acc: &mut Array, value: Value) {
    if acc.push(value).is_none() {
        warn!("dropping appended value: the next integer key is already occupied");
    }
}

fn apply_marker(acc: &mut Array, key: Key, marker: Marker, deferred: &mut Vec<Deferred>) {
    trace!(%key, %marker, "applying marker");
    match marker {
        Marker::Unset => {
            acc.remove(&key);
        }
        Marker::Replace(value) => {
            acc.insert(key, settle_value(*value));
        }
        Marker::InsertBefore { before, value } => {
            acc.insert_before(&before, key, settle_value(*value));
        }
        Marker::ReverseValues => deferred.push(Deferred::ReverseValues),
        Marker::RemoveKeys => deferred.push(Deferred::RemoveKeys),
        // Consumed by the fold before the carrying array is absorbed.
        Marker::ReverseBlockMerge => {}
        Marker::Custom(modifier) => {
            *acc = modifier.apply(std::mem::take(acc), &key);
        }
    }
}

fn finish(mut acc: Array, deferred: Vec<Deferred>) -> Array {
    for step in deferred {
        acc = match step {
            Deferred::ReverseValues => acc.reversed(),
            Deferred::RemoveKeys => acc.into_values(),
        };
    }
    acc
}

/// Removes reverse-block markers, reporting whether any was present.
fn strip_reverse_marker(array: Array) -> (Array, bool) {
    let marked = array
        .values()
        .any(|v| matches!(v, Value::Marker(Marker::ReverseBlockMerge)));
    if !marked {
        return (array, false);
    }
    let stripped = array
        .into_iter()
        .filter(|(_, v)| !matches!(v, Value::Marker(Marker::ReverseBlockMerge)))
        .collect();
    (stripped, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn array(s: &str) -> Array {
        from_json(s).unwrap().as_array().cloned().unwrap()
    }

    #[test]
    fn test_fold_empty() {
        assert_eq!(fold(Vec::new()), Array::new());
    }

    #[test]
    fn test_reverse_block_ordering() {
        let earlier = array(r#"{"option1": "valueA", "option3": "valueAA"}"#);
        let later = array(r#"{"option1": "valueB", "option2": "valueBB"}"#);
        let result = fold(vec![
            (earlier, MergeStrategy::Default),
            (later, MergeStrategy::ReverseBlock),
        ]);
        assert_eq!(
            result,
            array(r#"{"option1": "valueB", "option2": "valueBB", "option3": "valueAA"}"#)
        );
    }

    #[test]
    fn test_reverse_block_nested() {
        let earlier = array(r#"{"db": {"host": "a", "port": 1}, "only": true}"#);
        let later = array(r#"{"db": {"user": "u", "host": "b"}, "new": 1}"#);
        let result = fold(vec![
            (earlier, MergeStrategy::Default),
            (later, MergeStrategy::ReverseBlock),
        ]);
        assert_eq!(
            result,
            array(r#"{"db": {"user": "u", "host": "b", "port": 1}, "new": 1, "only": true}"#)
        );
    }

    #[test]
    fn test_reverse_block_keeps_nested_unset() {
        let earlier = array(r#"{"db": {"host": "a", "port": 1}}"#);
        let mut db = Array::new();
        db.insert("port", Value::Marker(Marker::Unset));
        let mut later = Array::new();
        later.insert("db", Value::Array(db));
        let result = fold(vec![
            (earlier, MergeStrategy::Default),
            (later, MergeStrategy::ReverseBlock),
        ]);
        assert_eq!(result, array(r#"{"db": {"host": "a"}}"#));
    }

    #[test]
    fn test_reverse_block_keeps_nested_replace() {
        let earlier = array(r#"{"db": {"opts": {"a": 1}, "host": "a"}}"#);
        let mut db = Array::new();
        db.insert("opts", Value::Marker(Marker::replace(from_json(r#"{"b": 2}"#).unwrap())));
        let mut later = Array::new();
        later.insert("db", Value::Array(db));
        let result = fold(vec![
            (earlier, MergeStrategy::Default),
            (later, MergeStrategy::ReverseBlock),
        ]);
        assert_eq!(result, array(r#"{"db": {"opts": {"b": 2}, "host": "a"}}"#));
    }

    #[test]
    fn test_append_past_max_key_is_dropped() {
        let mut first = Array::new();
        first.insert(i64::MAX, Value::from("last"));
        let second = array(r#"["extra"]"#);
        let result = fold(vec![
            (first.clone(), MergeStrategy::Default),
            (second, MergeStrategy::Default),
        ]);
        assert_eq!(result, first);
    }

    #[test]
    fn test_settle_keeps_keys() {
        let mut input = array(r#"{"5": "a", "x": "b"}"#);
        input.insert("gone", Value::Marker(Marker::Unset));
        assert_eq!(settle(input), array(r#"{"5": "a", "x": "b"}"#));
    }

    #[test]
    fn test_strip_reverse_marker() {
        let mut input = array(r#"{"a": 1}"#);
        input.insert("marker", Value::Marker(Marker::ReverseBlockMerge));
        let (stripped, marked) = strip_reverse_marker(input);
        assert!(marked);
        assert_eq!(stripped, array(r#"{"a": 1}"#));
    }
}
