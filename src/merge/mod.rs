//! Merge module - recursive merging of arrays.
//!
//! Plain arrays are merged with [`merge`], where [`Marker`] values stored in
//! the arrays alter the result. [`ArrayCollection`] attaches [`Modifier`]s
//! to an array instead and merges through [`ArrayCollection::merge_with`].

mod collection;
mod engine;
mod marker;
mod merger;
mod modifier;
mod modifiers;


pub use collection::*;
pub use marker::*;
pub use merger::*;
pub use modifier::*;
pub use modifiers::*;
