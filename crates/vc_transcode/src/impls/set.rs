use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::Transcode;
use crate::adapter::{Growable, growable_adapter};
use crate::impls::collection_debug;
use crate::impls::list::impl_collection_transcode;
use crate::info::{CollectionInfo, CollectionShape, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::Collection;
use crate::transcode::impl_transcode_cast_fn;

// -----------------------------------------------------------------------------
// Hash sets

macro_rules! impl_hash_set {
    ($ty:ident) => {
        impl<T, S> Typed for $ty<T, S>
        where
            T: Transcode + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Collection(CollectionInfo::new::<Self, T>(
                        CollectionShape::Set,
                        growable_adapter::<Self>,
                    ))
                })
            }
        }

        impl<T, S> Transcode for $ty<T, S>
        where
            T: Transcode + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            impl_transcode_cast_fn!(Collection);

            #[inline]
            fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                collection_debug(self, f)
            }
        }

        impl<T, S> Collection for $ty<T, S>
        where
            T: Transcode + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn count(&self) -> usize {
                self.len()
            }

            fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
                Box::new(self.iter().map(Transcode::as_transcode))
            }
        }

        impl<T, S> Growable for $ty<T, S>
        where
            T: Transcode + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            const SHAPE: CollectionShape = CollectionShape::Set;

            type Item = T;

            #[inline]
            fn push_item(&mut self, item: T) {
                self.insert(item);
            }

            #[inline]
            fn item_count(&self) -> usize {
                self.len()
            }

            fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
                Box::new(self.iter())
            }

            // Hash sets have no order to reverse.
            #[inline]
            fn reverse_items(&mut self) {}

            #[inline]
            fn clear_items(&mut self) {
                self.clear();
            }
        }
    };
}

use std::collections::HashSet;

impl_hash_set!(HashSet);

mod hashbrown_set {
    use super::*;
    use hashbrown::HashSet;

    impl_hash_set!(HashSet);
}

// -----------------------------------------------------------------------------
// BTreeSet

impl_collection_transcode!(BTreeSet<T>, Set, growable_adapter, Ord);

impl<T: Transcode + Typed + Ord> Growable for BTreeSet<T> {
    const SHAPE: CollectionShape = CollectionShape::Set;

    type Item = T;

    #[inline]
    fn push_item(&mut self, item: T) {
        self.insert(item);
    }

    #[inline]
    fn item_count(&self) -> usize {
        self.len()
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    // Sorted, reversal would not survive materialization.
    #[inline]
    fn reverse_items(&mut self) {}

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
    use crate::info::{CollectionShape, Typed, classify, TypeClass};
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use foldhash::fast::FixedState;
    use std::collections::HashSet;

    #[test]
    fn sets_deduplicate_through_their_adapter() {
        let mut adapter = adapter_for(<HashSet<u8>>::type_info()).unwrap();
        assert_eq!(adapter.shape(), CollectionShape::Set);
        for n in [1_u8, 2, 1] {
            adapter.add(n.into_boxed_transcode()).unwrap();
        }
        assert_eq!(adapter.count(), 2);

        let set = adapter.materialize().unwrap().take::<HashSet<u8>>().unwrap();
        assert!(set.contains(&1) && set.contains(&2));
    }

    #[test]
    fn ordered_and_fixed_state_sets() {
        let mut adapter = adapter_for(<BTreeSet<i32>>::type_info()).unwrap();
        for n in [3, 1, 2] {
            adapter.add(n.into_boxed_transcode()).unwrap();
        }
        adapter.reverse();
        let set = adapter.materialize().unwrap().take::<BTreeSet<i32>>().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 2, 3]);

        let info = <hashbrown::HashSet<i32, FixedState>>::type_info();
        assert_eq!(classify(info), TypeClass::Collection);
    }
}
