//! Path module - Addressing, reading and writing nested array locations.
//!
//! A path is an ordered sequence of [`Key`]s. Callers describe one with a
//! [`PathSpec`], which may be a single key, a delimited string, a nested
//! list of either, or a getter closure that bypasses traversal.

mod exists;
mod mutate;
mod parser;
mod traverse;

pub use exists::*;
pub use mutate::*;
pub use parser::*;
pub use traverse::*;

use crate::error::{Error, Result};
use crate::value::{Key, Value};
use std::fmt;
use std::sync::Arc;

/// Getter computes a value directly from the root and the default value.
pub type Getter = Arc<dyn Fn(&Value, Value) -> Result<Value> + Send + Sync>;

/// PathSpec describes a location in nested arrays.
#[derive(Clone)]
pub enum PathSpec {
    /// A single key, used verbatim.
    Key(Key),
    /// A string key. The `*_by_path` operations split it into segments.
    Str(String),
    /// Segments flattened left to right, recursively.
    List(Vec<PathSpec>),
    /// A closure invoked instead of any lookup. Only valid as a whole path.
    Getter(Getter),
}

impl PathSpec {
    /// The empty path, addressing the root itself.
    pub fn root() -> Self {
        PathSpec::List(Vec::new())
    }

    /// Wraps a getter closure.
    pub fn getter(f: impl Fn(&Value, Value) -> Result<Value> + Send + Sync + 'static) -> Self {
        PathSpec::Getter(Arc::new(f))
    }

    /// Flattens the spec into keys. String segments are split with `parser`
    /// when one is given, otherwise each string is a single key.
    pub fn to_keys(&self, parser: Option<&PathParser>) -> Result<Vec<Key>> {
        let mut keys = Vec::new();
        self.collect_keys(parser, &mut keys)?;
        Ok(keys)
    }

    fn collect_keys(&self, parser: Option<&PathParser>, keys: &mut Vec<Key>) -> Result<()> {
        match self {
            PathSpec::Key(key) => keys.push(key.clone()),
            PathSpec::Str(s) => match parser {
                Some(parser) => keys.extend(parser.parse(s).into_iter().map(Key::from)),
                None => keys.push(Key::from(s.as_str())),
            },
            PathSpec::List(items) => {
                for item in items {
                    item.collect_keys(parser, keys)?;
                }
            }
            PathSpec::Getter(_) => {
                return Err(Error::invalid_argument(
                    "a getter closure must be used as the whole path",
                ))
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Key(key) => f.debug_tuple("Key").field(key).finish(),
            PathSpec::Str(s) => f.debug_tuple("Str").field(s).finish(),
            PathSpec::List(items) => f.debug_tuple("List").field(items).finish(),
            PathSpec::Getter(_) => f.write_str("Getter(..)"),
        }
    }
}

impl From<Key> for PathSpec {
    fn from(key: Key) -> Self {
        PathSpec::Key(key)
    }
}

impl From<&Key> for PathSpec {
    fn from(key: &Key) -> Self {
        PathSpec::Key(key.clone())
    }
}

impl From<i64> for PathSpec {
    fn from(i: i64) -> Self {
        PathSpec::Key(Key::Int(i))
    }
}

impl From<i32> for PathSpec {
    fn from(i: i32) -> Self {
        PathSpec::Key(Key::from(i))
    }
}

impl From<f64> for PathSpec {
    fn from(f: f64) -> Self {
        PathSpec::Key(Key::from_f64(f))
    }
}

impl From<&str> for PathSpec {
    fn from(s: &str) -> Self {
        PathSpec::Str(s.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(s: String) -> Self {
        PathSpec::Str(s)
    }
}

impl<T: Into<PathSpec>> From<Vec<T>> for PathSpec {
    fn from(items: Vec<T>) -> Self {
        PathSpec::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathSpec>, const N: usize> From<[T; N]> for PathSpec {
    fn from(items: [T; N]) -> Self {
        PathSpec::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathSpec>> From<Option<T>> for PathSpec {
    fn from(path: Option<T>) -> Self {
        path.map_or_else(PathSpec::root, Into::into)
    }
}
