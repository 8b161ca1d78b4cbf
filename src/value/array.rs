//! Insertion-ordered array of key/value entries.

use super::key::Key;
use super::value::Value;

/// Array is an ordered map from [`Key`] to [`Value`].
///
/// Keys are unique. Iteration follows insertion order and overwriting an
/// existing key keeps its position. Appending with [`Array::push`] uses the
/// next free integer index: one greater than the largest integer key ever
/// inserted, or zero. Once `i64::MAX` has been used as a key there is no
/// free index left and appending fails.
#[derive(Debug, Clone)]
pub struct Array {
    entries: Vec<(Key, Value)>,
    /// `None` once the integer key space is exhausted.
    next_index: Option<i64>,
}

impl Array {
    /// Creates a new empty array.
    pub fn new() -> Self {
        Array {
            entries: Vec::new(),
            next_index: Some(0),
        }
    }

    /// Creates an empty array with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            entries: Vec::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Creates a list keyed `0..n` from the given values.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut array = Array::new();
        for (index, value) in (0i64..).zip(values) {
            array.entries.push((Key::Int(index), value));
            array.next_index = index.checked_add(1);
        }
        array
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the array has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the position of `key` in iteration order.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Gets the value stored at `key`.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Gets a mutable reference to the value stored at `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns true if the array contains `key`.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.position(key).is_some()
    }

    /// Inserts a value, returning the previous value at that key.
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.track_index(&key);
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Appends a value at the next free integer index and returns its key.
    ///
    /// Returns `None` without storing the value when the next index is
    /// already occupied, which happens once `i64::MAX` is a key.
    pub fn push(&mut self, value: Value) -> Option<Key> {
        let key = Key::Int(self.next_index?);
        self.track_index(&key);
        self.entries.push((key.clone(), value));
        Some(key)
    }

    /// Inserts `key` immediately before `before`, moving it if it already
    /// exists. Appends when `before` is absent.
    pub fn insert_before(&mut self, before: &Key, key: impl Into<Key>, value: Value) {
        let key = key.into();
        if let Some(idx) = self.position(&key) {
            self.entries.remove(idx);
        }
        self.track_index(&key);
        match self.position(before) {
            Some(idx) => self.entries.insert(idx, (key, value)),
            None => self.entries.push((key, value)),
        }
    }

    /// Removes `key`, returning its value. Remaining entries keep their order.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Gets the value at `key`, inserting the result of `default` first if
    /// the key is absent.
    pub fn get_or_insert_with(&mut self, key: Key, default: impl FnOnce() -> Value) -> &mut Value {
        let idx = match self.position(&key) {
            Some(idx) => idx,
            None => {
                self.track_index(&key);
                self.entries.push((key, default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns an iterator over the entries with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    /// Returns true if the keys are exactly `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| matches!(k, Key::Int(n) if usize::try_from(*n) == Ok(i)))
    }

    /// Returns true if some value at an integer key is strictly equal to `value`.
    pub fn contains_indexed_value(&self, value: &Value) -> bool {
        self.entries
            .iter()
            .any(|(k, v)| k.is_int() && v == value)
    }

    /// Drops all keys and renumbers the values `0..n`.
    pub fn into_values(self) -> Array {
        Array::from_values(self.entries.into_iter().map(|(_, v)| v))
    }

    /// Returns the entries in reverse order, keys preserved.
    pub fn reversed(mut self) -> Array {
        self.entries.reverse();
        self
    }

    fn track_index(&mut self, key: &Key) {
        if let (Key::Int(i), Some(next)) = (key, self.next_index) {
            if *i >= next {
                self.next_index = i.checked_add(1);
            }
        }
    }
}

impl Default for Array {
    fn default() -> Self {
        Array::new()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<Key>> FromIterator<(K, Value)> for Array {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut array = Array::new();
        array.extend(iter);
        array
    }
}

impl<K: Into<Key>> Extend<(K, Value)> for Array {
    fn extend<T: IntoIterator<Item = (K, Value)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Borrowing iterator over the entries of an [`Array`].
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut array = Array::new();
        array.insert("a", Value::Int(1));
        array.insert("b", Value::Int(2));
        let old = array.insert("a", Value::Int(3));

        assert_eq!(old, Some(Value::Int(1)));
        let keys: Vec<_> = array.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("a"), Key::from("b")]);
        assert_eq!(array.get(&Key::from("a")), Some(&Value::Int(3)));
    }

    #[test]
    fn test_push_uses_next_free_index() {
        let mut array = Array::new();
        array.insert(5i64, Value::from("five"));
        array.insert("name", Value::from("x"));
        assert_eq!(array.push(Value::from("six")), Some(Key::Int(6)));

        array.remove(&Key::Int(6));
        // Removal does not rewind the counter.
        assert_eq!(array.push(Value::from("seven")), Some(Key::Int(7)));
    }

    #[test]
    fn test_negative_keys_do_not_advance_index() {
        let mut array = Array::new();
        array.insert(-3i64, Value::Null);
        assert_eq!(array.push(Value::Null), Some(Key::Int(0)));
    }

    #[test]
    fn test_push_after_max_key_is_refused() {
        let mut array = Array::new();
        array.insert(i64::MAX, Value::from("last"));
        assert_eq!(array.push(Value::from("overflow")), None);
        assert_eq!(array.len(), 1);
        assert_eq!(array.get(&Key::Int(i64::MAX)), Some(&Value::from("last")));

        // Explicit keys still work.
        array.insert("name", Value::Null);
        array.insert(0i64, Value::Null);
        assert_eq!(array.len(), 3);
        assert_eq!(array.push(Value::Null), None);
    }

    #[test]
    fn test_insert_before() {
        let mut array: Array = vec![("a", Value::Int(1)), ("c", Value::Int(3))]
            .into_iter()
            .collect();
        array.insert_before(&Key::from("c"), "b", Value::Int(2));
        array.insert_before(&Key::from("missing"), "d", Value::Int(4));

        let keys: Vec<_> = array.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_is_list() {
        assert!(Array::new().is_list());
        assert!(Array::from_values(vec![Value::Int(1), Value::Int(2)]).is_list());

        let mut array = Array::new();
        array.insert(1i64, Value::Null);
        array.insert(0i64, Value::Null);
        assert!(!array.is_list());
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: Array = vec![("x", Value::Int(1)), ("y", Value::Int(2))]
            .into_iter()
            .collect();
        let b: Array = vec![("y", Value::Int(2)), ("x", Value::Int(1))]
            .into_iter()
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_into_values_renumbers() {
        let array: Array = vec![("x", Value::Int(1)), ("7", Value::Int(2))]
            .into_iter()
            .collect();
        let values = array.into_values();
        assert!(values.is_list());
        assert_eq!(values.get(&Key::Int(1)), Some(&Value::Int(2)));
    }
}
