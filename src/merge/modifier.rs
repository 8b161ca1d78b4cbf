//! Modifier capabilities for collection merges.

use crate::value::{Array, Value};
use std::fmt;
use std::sync::Arc;

pub const PRIORITY_HIGH: i32 = 100;
pub const PRIORITY_NORMAL: i32 = 0;
pub const PRIORITY_LOW: i32 = -100;

/// How a collection is folded into the collections before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Later values win, new keys are appended.
    #[default]
    Default,
    /// Later entries come first, earlier-only entries follow.
    ReverseBlock,
}

/// Modifier alters how an [`ArrayCollection`](super::ArrayCollection) is
/// merged or read.
///
/// A modifier implements any subset of the three capabilities and exposes
/// them through the accessor methods. Modifiers attached to one collection
/// run by descending [`priority`](Modifier::priority); equal priorities
/// keep the order in which they were attached.
pub trait Modifier: fmt::Debug + Send + Sync {
    fn priority(&self) -> i32 {
        PRIORITY_NORMAL
    }

    fn as_before_merge(&self) -> Option<&dyn BeforeMerge> {
        None
    }

    fn as_after_merge(&self) -> Option<&dyn AfterMerge> {
        None
    }

    fn as_data(&self) -> Option<&dyn DataModifier> {
        None
    }

    fn strategy(&self) -> MergeStrategy {
        MergeStrategy::Default
    }
}

/// Rewrites a collection's data before it is folded.
pub trait BeforeMerge {
    /// `arrays` holds the data of every collection in the merge; `index`
    /// points at the collection this modifier is attached to.
    fn before_merge(&self, arrays: &[Array], index: usize, scratch: &mut Scratch) -> Array;
}

/// Rewrites the fully merged data.
pub trait AfterMerge {
    fn after_merge(&self, data: Array, scratch: &mut Scratch) -> Array;
}

/// Rewrites data whenever a collection is read.
pub trait DataModifier {
    fn apply(&self, data: Array) -> Array;
}

/// Scratch is a slot owned by a single merge call and handed to one
/// modifier's before-merge and after-merge hooks.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    slot: Option<Value>,
}

impl Scratch {
    pub fn put(&mut self, value: Value) {
        self.slot = Some(value);
    }

    pub fn take(&mut self) -> Option<Value> {
        self.slot.take()
    }

    pub fn peek(&self) -> Option<&Value> {
        self.slot.as_ref()
    }
}

/// Prioritized overrides the priority of another modifier.
#[derive(Debug, Clone)]
pub struct Prioritized {
    inner: Arc<dyn Modifier>,
    priority: i32,
}

impl Prioritized {
    pub fn new(modifier: impl Modifier + 'static, priority: i32) -> Self {
        Prioritized {
            inner: Arc::new(modifier),
            priority,
        }
    }
}

impl Modifier for Prioritized {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn as_before_merge(&self) -> Option<&dyn BeforeMerge> {
        self.inner.as_before_merge()
    }

    fn as_after_merge(&self) -> Option<&dyn AfterMerge> {
        self.inner.as_after_merge()
    }

    fn as_data(&self) -> Option<&dyn DataModifier> {
        self.inner.as_data()
    }

    fn strategy(&self) -> MergeStrategy {
        self.inner.strategy()
    }
}

/// Returns indices into `modifiers` in execution order.
pub(crate) fn execution_order(modifiers: &[Arc<dyn Modifier>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..modifiers.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(modifiers[i].priority()));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(i32);

    impl Modifier for Named {
        fn priority(&self) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_execution_order_is_stable() {
        let modifiers: Vec<Arc<dyn Modifier>> = vec![
            Arc::new(Named(PRIORITY_NORMAL)),
            Arc::new(Named(PRIORITY_HIGH)),
            Arc::new(Named(PRIORITY_LOW)),
            Arc::new(Named(PRIORITY_HIGH)),
        ];
        assert_eq!(execution_order(&modifiers), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_prioritized_overrides_priority() {
        let m = Prioritized::new(Named(1), 42);
        assert_eq!(m.priority(), 42);
        assert!(m.as_before_merge().is_none());
    }

    #[test]
    fn test_scratch() {
        let mut scratch = Scratch::default();
        assert!(scratch.peek().is_none());
        scratch.put(Value::Int(1));
        assert_eq!(scratch.take(), Some(Value::Int(1)));
        assert!(scratch.take().is_none());
    }
}
