use core::any::TypeId;
use core::fmt::Debug;

use foldhash::fast::FixedState;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// A fixed seed, so that tables built in different runs hash identically.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`], used by the static info cells and the metadata cache.
///
/// `new` is `const`, so the map can sit directly inside a `static`.
pub(crate) struct TypeIdMap<V>(HashMap<TypeId, V, FixedState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(FIXED_HASH_STATE))
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns the value for `type_id`, inserting the result of `f` if the key is absent.
    ///
    /// When two writers race, the first insertion wins and `f` is not called for the second.
    #[inline]
    pub fn get_or_insert_with(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Inserts `value` only if the key is absent. Returns `false` if the key already existed.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, value: V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn first_writer_wins() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<u8>(), 1));
        assert!(!map.try_insert(TypeId::of::<u8>(), 2));
        assert_eq!(map.get(&TypeId::of::<u8>()), Some(&1));

        let value = map.get_or_insert_with(TypeId::of::<u8>(), || 3);
        assert_eq!(*value, 1);
        assert_eq!(map.len(), 1);
    }
}
