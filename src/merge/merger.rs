//! Recursive merging of plain arrays.

use super::engine;
use super::modifier::MergeStrategy;
use crate::value::Array;
use tracing::debug;

/// Merges arrays recursively, left to right.
///
/// - Integer-keyed entries of later arrays are appended with fresh,
///   sequential keys, unless a strictly equal value is already stored under
///   an integer key of the result.
/// - String-keyed entries overwrite earlier values in place, except that
///   two arrays under the same key are merged recursively.
/// - [`Marker`](super::Marker) values are applied instead of being stored.
///
/// Merging no arrays yields an empty array; merging one array returns it
/// with its markers resolved.
pub fn merge(arrays: impl IntoIterator<Item = Array>) -> Array {
    let inputs: Vec<(Array, MergeStrategy)> = arrays
        .into_iter()
        .map(|array| (array, MergeStrategy::Default))
        .collect();
    debug!(inputs = inputs.len(), "merging arrays");
    engine::fold(inputs)
}
