use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::Transcode;
use crate::adapter::{MapLike, map_adapter};
use crate::impls::dictionary_debug;
use crate::info::{DictionaryInfo, DictionaryShape, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::Dictionary;
use crate::transcode::impl_transcode_cast_fn;

// -----------------------------------------------------------------------------
// Shared

macro_rules! impl_dictionary {
    (
        impl<$($param:ident),*> for $ty:ty, $shape:ident
        where $($bounds:tt)*
    ) => {
        impl<$($param),*> Typed for $ty
        where $($bounds)*
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Dictionary(DictionaryInfo::new::<Self, K, V, (K, V)>(
                        DictionaryShape::$shape,
                        map_adapter::<Self>,
                    ))
                })
            }
        }

        impl<$($param),*> Transcode for $ty
        where $($bounds)*
        {
            impl_transcode_cast_fn!(Dictionary);

            #[inline]
            fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                dictionary_debug(self, f)
            }
        }

        impl<$($param),*> Dictionary for $ty
        where $($bounds)*
        {
            #[inline]
            fn count(&self) -> usize {
                self.len()
            }

            fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key.as_transcode(), value.as_transcode())),
                )
            }
        }

        impl<$($param),*> MapLike for $ty
        where $($bounds)*
        {
            const SHAPE: DictionaryShape = DictionaryShape::$shape;

            type Key = K;

            type Value = V;

            #[inline]
            fn insert_entry(&mut self, key: K, value: V) {
                self.insert(key, value);
            }

            #[inline]
            fn contains_entry(&self, key: &dyn Transcode) -> bool {
                key.downcast_ref::<K>()
                    .is_some_and(|key| self.contains_key(key))
            }

            #[inline]
            fn remove_entry(&mut self, key: &dyn Transcode) -> bool {
                key.downcast_ref::<K>()
                    .is_some_and(|key| self.remove(key).is_some())
            }

            #[inline]
            fn clear_entries(&mut self) {
                self.clear();
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Implementations

impl_dictionary! {
    impl<K, V, S> for std::collections::HashMap<K, V, S>, Map
    where
        K: Transcode + Typed + Eq + Hash,
        V: Transcode + Typed,
        S: BuildHasher + Default + Send + Sync + 'static,
}

impl_dictionary! {
    impl<K, V, S> for hashbrown::HashMap<K, V, S>, Map
    where
        K: Transcode + Typed + Eq + Hash,
        V: Transcode + Typed,
        S: BuildHasher + Default + Send + Sync + 'static,
}

impl_dictionary! {
    impl<K, V> for BTreeMap<K, V>, OrderedMap
    where
        K: Transcode + Typed + Ord,
        V: Transcode + Typed,
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Transcode;
    use crate::adapter::dictionary_adapter_for;
    use crate::info::{DictionaryShape, Typed, is_dictionary};
    use crate::ops::TranscodeRef;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use std::collections::HashMap;

    #[test]
    fn entries_enumerate_keys_and_values() {
        let map = BTreeMap::from([(1_i32, String::from("a")), (2, String::from("b"))]);
        let TranscodeRef::Dictionary(dictionary) = map.transcode_ref() else {
            panic!("`BTreeMap` should be a dictionary");
        };
        assert_eq!(dictionary.count(), 2);
        let (key, value) = dictionary.entries().next().unwrap();
        assert_eq!(key.downcast_ref::<i32>(), Some(&1));
        assert_eq!(value.downcast_ref::<String>().unwrap(), "a");
        assert_eq!(format!("{:?}", map.as_transcode()), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn hash_map_adapter() {
        let info = <HashMap<String, u32>>::type_info();
        assert!(is_dictionary(info));
        let pair = info.as_dictionary().unwrap().pair_info();
        assert!(pair.is::<(String, u32)>());

        let mut adapter = dictionary_adapter_for(info).unwrap();
        assert_eq!(adapter.shape(), DictionaryShape::Map);
        adapter
            .insert(String::from("k").into_boxed_transcode(), 1_u32.into_boxed_transcode())
            .unwrap();
        assert!(adapter.contains_key(&String::from("k")));
        assert!(!adapter.contains_key(&1_u32));

        let map = adapter.materialize().unwrap().take::<HashMap<String, u32>>().unwrap();
        assert_eq!(map.get("k"), Some(&1));
    }
}
