use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Transcode;
use crate::adapter::{Growable, growable_adapter};
use crate::info::{CollectionInfo, CollectionShape, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::Collection;
use crate::transcode::impl_transcode_cast_fn;

// -----------------------------------------------------------------------------
// Stack

/// A last-in-first-out collection.
///
/// Iteration visits the elements in pop order, newest first. The dynamic
/// representation stores this order, and a round trip restores it.
///
/// # Examples
///
/// ```
/// use vc_transcode::collections::Stack;
///
/// let mut stack: Stack<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// assert_eq!(stack.peek(), Some(&3));
/// assert_eq!(stack.pop(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The element [`pop`](Self::pop) would return.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate in pop order.
    #[inline]
    pub fn iter(&self) -> core::iter::Rev<core::slice::Iter<'_, T>> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes the items in iteration order, the last one ends on top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Vec::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

// -----------------------------------------------------------------------------
// Transcode

impl<T: Transcode + Typed> Typed for Stack<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Collection(CollectionInfo::new::<Self, T>(
                CollectionShape::Stack,
                growable_adapter::<Self>,
            ))
        })
    }
}

impl<T: Transcode + Typed> Transcode for Stack<T> {
    impl_transcode_cast_fn!(Collection);
}

impl<T: Transcode + Typed> Collection for Stack<T> {
    #[inline]
    fn count(&self) -> usize {
        self.items.len()
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
        Box::new(self.iter().map(|item| item as &dyn Transcode))
    }
}

impl<T: Transcode + Typed> Growable for Stack<T> {
    const SHAPE: CollectionShape = CollectionShape::Stack;

    type Item = T;

    #[inline]
    fn push_item(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    #[inline]
    fn reverse_items(&mut self) {
        self.items.reverse();
    }

    #[inline]
    fn clear_items(&mut self) {
        self.items.clear();
    }
}
