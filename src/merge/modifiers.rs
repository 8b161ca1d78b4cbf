//! Built-in collection modifiers.

use super::modifier::{AfterMerge, BeforeMerge, DataModifier, MergeStrategy, Modifier, Scratch};
use crate::value::{Array, Key, Value};

/// Removes a key from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsetValue {
    key: Key,
}

impl UnsetValue {
    pub fn new(key: impl Into<Key>) -> Self {
        UnsetValue { key: key.into() }
    }
}

impl Modifier for UnsetValue {
    fn as_data(&self) -> Option<&dyn DataModifier> {
        Some(self)
    }
}

impl DataModifier for UnsetValue {
    fn apply(&self, mut data: Array) -> Array {
        data.remove(&self.key);
        data
    }
}

/// Stores the carrying collection's value at `key` outright instead of deep
/// merging it with earlier values.
///
/// When a later collection also holds `key`, the carrying value is nulled
/// before the fold so the later value replaces it. Otherwise, if an earlier
/// collection holds `key`, the carrying value is captured before the merge
/// and written back after it, through the merge call's [`Scratch`] slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceValue {
    key: Key,
}

impl ReplaceValue {
    pub fn new(key: impl Into<Key>) -> Self {
        ReplaceValue { key: key.into() }
    }
}

impl Modifier for ReplaceValue {
    fn as_before_merge(&self) -> Option<&dyn BeforeMerge> {
        Some(self)
    }

    fn as_after_merge(&self) -> Option<&dyn AfterMerge> {
        Some(self)
    }
}

impl BeforeMerge for ReplaceValue {
    fn before_merge(&self, arrays: &[Array], index: usize, scratch: &mut Scratch) -> Array {
        let mut data = arrays.get(index).cloned().unwrap_or_default();
        let Some(value) = data.get(&self.key).cloned() else {
            return data;
        };
        let holds_key = |array: &Array| array.contains_key(&self.key);

        if arrays.iter().skip(index + 1).any(holds_key) {
            data.insert(self.key.clone(), Value::Null);
        } else if arrays.iter().take(index).any(holds_key) {
            scratch.put(value);
        }
        data
    }
}

impl AfterMerge for ReplaceValue {
    fn after_merge(&self, mut data: Array, scratch: &mut Scratch) -> Array {
        if let Some(value) = scratch.take() {
            data.insert(self.key.clone(), value);
        }
        data
    }
}

/// Drops all keys, renumbering values `0..n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveAllKeys;

impl Modifier for RemoveAllKeys {
    fn as_data(&self) -> Option<&dyn DataModifier> {
        Some(self)
    }
}

impl DataModifier for RemoveAllKeys {
    fn apply(&self, data: Array) -> Array {
        data.into_values()
    }
}

/// Reverses the entry order, keeping keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseValues;

impl Modifier for ReverseValues {
    fn as_data(&self) -> Option<&dyn DataModifier> {
        Some(self)
    }
}

impl DataModifier for ReverseValues {
    fn apply(&self, data: Array) -> Array {
        data.reversed()
    }
}

/// Folds the carrying collection as a reverse block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseBlockMerge;

impl Modifier for ReverseBlockMerge {
    fn strategy(&self) -> MergeStrategy {
        MergeStrategy::ReverseBlock
    }
}

/// Inserts `value` at `key`, placed right before `before`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertValueBeforeKey {
    key: Key,
    value: Value,
    before: Key,
}

impl InsertValueBeforeKey {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>, before: impl Into<Key>) -> Self {
        InsertValueBeforeKey {
            key: key.into(),
            value: value.into(),
            before: before.into(),
        }
    }
}

impl Modifier for InsertValueBeforeKey {
    fn as_data(&self) -> Option<&dyn DataModifier> {
        Some(self)
    }
}

impl DataModifier for InsertValueBeforeKey {
    fn apply(&self, mut data: Array) -> Array {
        data.insert_before(&self.before, self.key.clone(), self.value.clone());
        data
    }
}

/// Moves `key` to the end of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveValueToEnd {
    key: Key,
}

impl MoveValueToEnd {
    pub fn new(key: impl Into<Key>) -> Self {
        MoveValueToEnd { key: key.into() }
    }
}

impl Modifier for MoveValueToEnd {
    fn as_data(&self) -> Option<&dyn DataModifier> {
        Some(self)
    }
}

impl DataModifier for MoveValueToEnd {
    fn apply(&self, mut data: Array) -> Array {
        if let Some(value) = data.remove(&self.key) {
            data.insert(self.key.clone(), value);
        }
        data
    }
}
