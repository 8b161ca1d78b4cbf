//! Inline merge markers.

use crate::value::{Array, Key, Value};
use std::fmt;
use std::sync::Arc;

/// InlineModifier rewrites the accumulated array at the position where its
/// marker is met during a merge. `key` is the key the marker was stored at.
pub trait InlineModifier: fmt::Debug + Send + Sync {
    fn apply(&self, data: Array, key: &Key) -> Array;
}

/// Marker stands in for a value inside an array passed to [`merge`].
///
/// Markers are consumed by the merge and never appear in its result.
///
/// [`merge`]: super::merge
#[derive(Debug, Clone)]
pub enum Marker {
    /// Deletes the marker's key from the result.
    Unset,
    /// Stores the value at the marker's key without deep merging it.
    Replace(Box<Value>),
    /// Stores the value at the marker's key, placed right before `before`.
    InsertBefore { before: Key, value: Box<Value> },
    /// Reverses the entry order once the current level is merged.
    ReverseValues,
    /// Renumbers all entries `0..n` once the current level is merged.
    RemoveKeys,
    /// Merges the carrying array as a reverse block: its own entries come
    /// first, entries only found earlier follow.
    ReverseBlockMerge,
    /// Applies a user-supplied modifier.
    Custom(Arc<dyn InlineModifier>),
}

impl Marker {
    pub fn replace(value: impl Into<Value>) -> Self {
        Marker::Replace(Box::new(value.into()))
    }

    pub fn insert_before(before: impl Into<Key>, value: impl Into<Value>) -> Self {
        Marker::InsertBefore {
            before: before.into(),
            value: Box::new(value.into()),
        }
    }

    pub fn custom(modifier: impl InlineModifier + 'static) -> Self {
        Marker::Custom(Arc::new(modifier))
    }

    /// Returns true if the marker pins its key to the value supplied by the
    /// carrying array, so earlier values at that key are discarded.
    pub(crate) fn pins_key(&self) -> bool {
        matches!(self, Marker::Unset | Marker::Replace(_))
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Marker::Unset, Marker::Unset)
            | (Marker::ReverseValues, Marker::ReverseValues)
            | (Marker::RemoveKeys, Marker::RemoveKeys)
            | (Marker::ReverseBlockMerge, Marker::ReverseBlockMerge) => true,
            (Marker::Replace(a), Marker::Replace(b)) => a == b,
            (
                Marker::InsertBefore { before: a, value: x },
                Marker::InsertBefore { before: b, value: y },
            ) => a == b && x == y,
            (Marker::Custom(a), Marker::Custom(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Unset => write!(f, "unset"),
            Marker::Replace(_) => write!(f, "replace"),
            Marker::InsertBefore { before, .. } => write!(f, "insert before {}", before),
            Marker::ReverseValues => write!(f, "reverse values"),
            Marker::RemoveKeys => write!(f, "remove keys"),
            Marker::ReverseBlockMerge => write!(f, "reverse block merge"),
            Marker::Custom(m) => write!(f, "custom {:?}", m),
        }
    }
}
