//! Immutable arrays carrying their own merge modifiers.

use super::engine;
use super::modifier::{execution_order, MergeStrategy, Modifier, Scratch};
use crate::error::{Error, Result};
use crate::value::{Array, Key, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// ArrayCollection is an immutable array with a list of attached
/// [`Modifier`]s.
///
/// The stored data is never changed in place. Data modifiers are applied
/// each time the data is read, so [`raw_data`](Self::raw_data) and
/// [`to_array`](Self::to_array) may differ. A collection produced by
/// [`merge_with`](Self::merge_with) already holds the output of the
/// modifiers it carries; only modifiers attached afterwards run on read.
#[derive(Debug, Clone, Default)]
pub struct ArrayCollection {
    data: Array,
    modifiers: Vec<Arc<dyn Modifier>>,
    /// Number of leading modifiers whose data capability is already
    /// reflected in `data`.
    settled: usize,
}

impl ArrayCollection {
    pub fn new(data: Array) -> Self {
        ArrayCollection {
            data,
            modifiers: Vec::new(),
            settled: 0,
        }
    }

    /// Returns a copy holding `data` and the same modifiers.
    pub fn with_data(&self, data: Array) -> Self {
        ArrayCollection {
            data,
            modifiers: self.modifiers.clone(),
            settled: 0,
        }
    }

    /// Returns a copy with `modifier` attached after the existing ones.
    pub fn with_modifier(&self, modifier: impl Modifier + 'static) -> Self {
        self.with_added_modifiers([Arc::new(modifier) as Arc<dyn Modifier>])
    }

    pub fn with_added_modifiers(&self, modifiers: impl IntoIterator<Item = Arc<dyn Modifier>>) -> Self {
        let mut copy = self.clone();
        copy.modifiers.extend(modifiers);
        copy
    }

    pub fn without_modifiers(&self) -> Self {
        ArrayCollection::new(self.data.clone())
    }

    pub fn modifiers(&self) -> &[Arc<dyn Modifier>] {
        &self.modifiers
    }

    /// Returns the stored data without applying data modifiers.
    pub fn raw_data(&self) -> &Array {
        &self.data
    }

    /// Returns the data with every pending data modifier applied, in
    /// execution order.
    pub fn to_array(&self) -> Array {
        let pending = &self.modifiers[self.settled..];
        let mut data = self.data.clone();
        for index in execution_order(pending) {
            if let Some(modifier) = pending[index].as_data() {
                data = modifier.apply(data);
            }
        }
        data
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        self.to_array().get(&key).cloned()
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.to_array().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.to_array().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set(&mut self, key: impl Into<Key>, _value: Value) -> Result<()> {
        Err(Error::immutable_mutation(format!("set `{}`", key.into())))
    }

    pub fn remove(&mut self, key: impl Into<Key>) -> Result<Value> {
        Err(Error::immutable_mutation(format!("remove `{}`", key.into())))
    }

    pub fn clear(&mut self) -> Result<()> {
        Err(Error::immutable_mutation("clear"))
    }

    /// Merges `others` into this collection.
    ///
    /// Before-merge hooks of every collection run first and may rewrite that
    /// collection's data. The rewritten data is folded left to right, then
    /// the data and after-merge capabilities of each collection's modifiers
    /// are threaded through the folded result, collection by collection in
    /// execution order. The returned collection carries the modifiers of all
    /// merged collections, already applied.
    pub fn merge_with<'a>(&self, others: impl IntoIterator<Item = &'a ArrayCollection>) -> ArrayCollection {
        let mut collections: Vec<&ArrayCollection> = vec![self];
        for other in others {
            collections.push(other);
        }
        debug!(collections = collections.len(), "merging collections");

        let raw: Vec<Array> = collections.iter().map(|c| c.data.clone()).collect();
        let mut arrays = raw.clone();
        let mut scratch: Vec<Vec<Scratch>> = collections
            .iter()
            .map(|c| vec![Scratch::default(); c.modifiers.len()])
            .collect();

        for (index, collection) in collections.iter().enumerate() {
            for m in execution_order(&collection.modifiers) {
                if let Some(hook) = collection.modifiers[m].as_before_merge() {
                    trace!(collection = index, modifier = ?collection.modifiers[m], "before merge");
                    arrays[index] = hook.before_merge(&raw, index, &mut scratch[index][m]);
                }
            }
        }

        let inputs = collections.iter().zip(arrays).map(|(collection, array)| {
            let strategy = if collection
                .modifiers
                .iter()
                .any(|m| m.strategy() == MergeStrategy::ReverseBlock)
            {
                MergeStrategy::ReverseBlock
            } else {
                MergeStrategy::Default
            };
            (array, strategy)
        });
        let mut result = engine::fold(inputs);

        for (index, collection) in collections.iter().enumerate() {
            for m in execution_order(&collection.modifiers) {
                let modifier = &collection.modifiers[m];
                if let Some(hook) = modifier.as_data().filter(|_| m >= collection.settled) {
                    trace!(collection = index, ?modifier, "data");
                    result = hook.apply(result);
                }
                if let Some(hook) = modifier.as_after_merge() {
                    trace!(collection = index, ?modifier, "after merge");
                    result = hook.after_merge(result, &mut scratch[index][m]);
                }
            }
        }

        let modifiers: Vec<Arc<dyn Modifier>> = collections
            .iter()
            .flat_map(|c| c.modifiers.iter().cloned())
            .collect();
        ArrayCollection {
            data: result,
            settled: modifiers.len(),
            modifiers,
        }
    }
}

impl From<Array> for ArrayCollection {
    fn from(data: Array) -> Self {
        ArrayCollection::new(data)
    }
}

impl From<ArrayCollection> for Array {
    fn from(collection: ArrayCollection) -> Self {
        collection.to_array()
    }
}

impl IntoIterator for &ArrayCollection {
    type Item = (Key, Value);
    type IntoIter = <Array as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}
