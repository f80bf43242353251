use alloc::boxed::Box;
use alloc::collections::{LinkedList, VecDeque};
use alloc::vec::Vec;
use core::fmt;

use crate::Transcode;
use crate::adapter::{Growable, Indexed, growable_adapter, indexed_adapter};
use crate::impls::collection_debug;
use crate::info::{CollectionInfo, CollectionShape, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::Collection;
use crate::transcode::impl_transcode_cast_fn;

// -----------------------------------------------------------------------------
// Shared

/// `Typed`, `Transcode` and `Collection` for a single-parameter collection
/// exposing `len` and `iter`.
macro_rules! impl_collection_transcode {
    ($ty:ty, $shape:ident, $adapter:ident $(, $bound:path)*) => {
        impl<T: Transcode + Typed $(+ $bound)*> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Collection(CollectionInfo::new::<Self, T>(
                        CollectionShape::$shape,
                        $adapter::<Self>,
                    ))
                })
            }
        }

        impl<T: Transcode + Typed $(+ $bound)*> Transcode for $ty {
            impl_transcode_cast_fn!(Collection);

            #[inline]
            fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                collection_debug(self, f)
            }
        }

        impl<T: Transcode + Typed $(+ $bound)*> Collection for $ty {
            #[inline]
            fn count(&self) -> usize {
                self.len()
            }

            fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
                Box::new(self.iter().map(Transcode::as_transcode))
            }
        }
    };
}

pub(super) use impl_collection_transcode;

// -----------------------------------------------------------------------------
// Vec

impl_collection_transcode!(Vec<T>, List, indexed_adapter);

impl<T: Transcode + Typed> Growable for Vec<T> {
    const SHAPE: CollectionShape = CollectionShape::List;

    type Item = T;

    #[inline]
    fn push_item(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    #[inline]
    fn reverse_items(&mut self) {
        self.reverse();
    }

    #[inline]
    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T: Transcode + Typed> Indexed for Vec<T> {
    #[inline]
    fn get_item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    #[inline]
    fn insert_item(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }

    #[inline]
    fn remove_item(&mut self, index: usize) -> Option<T> {
        (index < self.len()).then(|| self.remove(index))
    }
}

// -----------------------------------------------------------------------------
// VecDeque

impl_collection_transcode!(VecDeque<T>, List, indexed_adapter);

impl<T: Transcode + Typed> Growable for VecDeque<T> {
    const SHAPE: CollectionShape = CollectionShape::List;

    type Item = T;

    #[inline]
    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    #[inline]
    fn reverse_items(&mut self) {
        self.make_contiguous().reverse();
    }

    #[inline]
    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T: Transcode + Typed> Indexed for VecDeque<T> {
    #[inline]
    fn get_item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    #[inline]
    fn insert_item(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }

    #[inline]
    fn remove_item(&mut self, index: usize) -> Option<T> {
        self.remove(index)
    }
}

// -----------------------------------------------------------------------------
// LinkedList

impl_collection_transcode!(LinkedList<T>, Linked, growable_adapter);

impl<T: Transcode + Typed> Growable for LinkedList<T> {
    const SHAPE: CollectionShape = CollectionShape::Linked;

    type Item = T;

    #[inline]
    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn reverse_items(&mut self) {
        let reversed = core::mem::take(self).into_iter().rev().collect();
        *self = reversed;
    }

    #[inline]
    fn clear_items(&mut self) {
        self.clear();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Transcode;
    use crate::adapter::adapter_for;
    use crate::info::Typed;
    use crate::ops::TranscodeRef;
    use alloc::collections::{LinkedList, VecDeque};
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn lists_enumerate_in_order() {
        let list: VecDeque<u8> = [1, 2, 3].into_iter().collect();
        let TranscodeRef::Collection(collection) = list.transcode_ref() else {
            panic!("`VecDeque` should be a collection");
        };
        let items: Vec<u8> = collection
            .items()
            .map(|item| *item.downcast_ref::<u8>().unwrap())
            .collect();
        assert_eq!(items, [1, 2, 3]);
        assert_eq!(format!("{:?}", list.as_transcode()), "[1, 2, 3]");
    }

    #[test]
    fn linked_list_through_its_adapter() {
        let mut adapter = adapter_for(<LinkedList<i32>>::type_info()).unwrap();
        for n in [1, 2, 3] {
            adapter.add(n.into_boxed_transcode()).unwrap();
        }
        adapter.reverse();
        assert!(adapter.get(0).is_err());

        let list = adapter.materialize().unwrap().take::<LinkedList<i32>>().unwrap();
        assert_eq!(list.into_iter().collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn deque_supports_index_access() {
        let mut adapter = adapter_for(<VecDeque<i32>>::type_info()).unwrap();
        adapter.add(5_i32.into_boxed_transcode()).unwrap();
        adapter.insert_at(0, 4_i32.into_boxed_transcode()).unwrap();
        assert!(adapter.remove_at(2).is_err());
        assert_eq!(adapter.remove_at(1).unwrap().take::<i32>().unwrap(), 5);

        let deque = adapter.materialize().unwrap().take::<VecDeque<i32>>().unwrap();
        assert_eq!(deque, [4]);
    }
}
