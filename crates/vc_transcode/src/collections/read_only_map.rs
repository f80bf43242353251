use alloc::boxed::Box;
use core::hash::{BuildHasher, Hash};

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::Transcode;
use crate::adapter::{DictionaryAdapter, ReadOnlyStaging, ReadOnlyView};
use crate::info::{DictionaryInfo, DictionaryShape, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::Dictionary;
use crate::transcode::impl_transcode_cast_fn;

// -----------------------------------------------------------------------------
// ReadOnlyMap

/// A dictionary that cannot be mutated once built.
///
/// ```
/// use vc_transcode::collections::ReadOnlyMap;
///
/// let map: ReadOnlyMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
/// assert_eq!(map.get(&"b"), Some(&2));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ReadOnlyMap<K, V> {
    inner: HashMap<K, V, FixedState>,
}

impl<K, V> ReadOnlyMap<K, V> {
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> hashbrown::hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }

    #[inline]
    pub fn keys(&self) -> hashbrown::hash_map::Keys<'_, K, V> {
        self.inner.keys()
    }

    #[inline]
    pub fn values(&self) -> hashbrown::hash_map::Values<'_, K, V> {
        self.inner.values()
    }
}

impl<K: Eq + Hash, V> ReadOnlyMap<K, V> {
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }
}

impl<K, V> Default for ReadOnlyMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self {
            inner: HashMap::with_hasher(FixedState::default()),
        }
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for ReadOnlyMap<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> From<HashMap<K, V, FixedState>> for ReadOnlyMap<K, V> {
    #[inline]
    fn from(inner: HashMap<K, V, FixedState>) -> Self {
        Self { inner }
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> From<std::collections::HashMap<K, V, S>> for ReadOnlyMap<K, V> {
    fn from(map: std::collections::HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for ReadOnlyMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut inner = HashMap::with_hasher(FixedState::default());
        inner.extend(iter);
        Self { inner }
    }
}

// -----------------------------------------------------------------------------
// Transcode

fn read_only_view<K, V>() -> Box<dyn DictionaryAdapter>
where
    K: Transcode + Typed + Eq + Hash,
    V: Transcode + Typed,
{
    Box::new(ReadOnlyView::<K, V>::default())
}

fn read_only_staging<K, V>() -> Box<dyn DictionaryAdapter>
where
    K: Transcode + Typed + Eq + Hash,
    V: Transcode + Typed,
{
    Box::new(ReadOnlyStaging::<K, V>::default())
}

impl<K, V> Typed for ReadOnlyMap<K, V>
where
    K: Transcode + Typed + Eq + Hash,
    V: Transcode + Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Dictionary(
                DictionaryInfo::new::<Self, K, V, (K, V)>(
                    DictionaryShape::ReadOnly,
                    read_only_view::<K, V>,
                )
                .with_staging(read_only_staging::<K, V>),
            )
        })
    }
}

impl<K, V> Transcode for ReadOnlyMap<K, V>
where
    K: Transcode + Typed + Eq + Hash,
    V: Transcode + Typed,
{
    impl_transcode_cast_fn!(Dictionary);
}

impl<K, V> Dictionary for ReadOnlyMap<K, V>
where
    K: Transcode + Typed + Eq + Hash,
    V: Transcode + Typed,
{
    #[inline]
    fn count(&self) -> usize {
        self.inner.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_> {
        Box::new(
            self.inner
                .iter()
                .map(|(key, value)| (key as &dyn Transcode, value as &dyn Transcode)),
        )
    }
}
