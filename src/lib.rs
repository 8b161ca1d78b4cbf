//! # Array Helper
//!
//! Helpers for ordered, mixed-key arrays: recursive merging with pluggable
//! modifiers, delimited path access, and indexing or grouping of rows.
//!
//! Arrays ([`Array`]) keep insertion order and mix integer and string keys.
//! Values ([`Value`]) are scalars, arrays, opaque objects reached through
//! [`ObjectAccess`], or merge [`Marker`]s.
//!
//! ## Modules
//!
//! - [`value`] - Keys, values, ordered arrays and their serde bridge
//! - [`path`] - Path parsing and get/set/remove/exists over nested values
//! - [`merge`] - Recursive merge with inline markers or collection modifiers
//! - [`index`] - Indexing, grouping, mapping and column extraction
//! - [`error`] - The error type shared by all operations
//!
//! ```
//! use array_helper::{get_by_path, merge, Value};
//! use array_helper::value::from_json;
//!
//! let base = from_json(r#"{"db": {"host": "localhost", "port": 5432}}"#).unwrap();
//! let local = from_json(r#"{"db": {"host": "db.internal"}}"#).unwrap();
//! let merged = Value::Array(merge([
//!     base.as_array().unwrap().clone(),
//!     local.as_array().unwrap().clone(),
//! ]));
//!
//! let host = get_by_path(&merged, "db.host", Value::Null, ".").unwrap();
//! assert_eq!(host, Value::from("db.internal"));
//! ```

pub mod error;
pub mod index;
pub mod merge;
pub mod path;
pub mod value;

pub use error::{Error, Result};
pub use merge::{merge, ArrayCollection, InlineModifier, Marker, MergeStrategy, Modifier};
pub use path::{
    get, get_by_path, key_exists, parse_path, path_exists, remove, remove_by_path, set,
    set_by_path, PathParser, PathSpec,
};
pub use value::{Array, Key, ObjectAccess, Record, Value};
