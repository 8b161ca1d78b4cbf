//! Value module - In-memory representation of nested, dynamically-typed arrays.
//!
//! This module provides keys, ordered arrays, values and the object
//! capability consumed by path traversal.

mod array;
mod key;
mod object;
mod serialize;
mod value;

pub use array::*;
pub use key::*;
pub use object::*;
pub use serialize::*;
pub use value::*;
