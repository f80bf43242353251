use alloc::boxed::Box;

use foldhash::fast::FixedState;

use crate::adapter::collection::take_item;
use crate::collections::ReadOnlyMap;
use crate::info::{DictionaryShape, TypeInfo, Typed};
use crate::ops::Dictionary;
use crate::{CapabilityError, Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// DictionaryAdapter

/// Uniform insert/iterate/materialize access to a concrete dictionary shape.
///
/// Read-only shapes reject every mutation with [`CapabilityError::ReadOnly`].
pub trait DictionaryAdapter: Send {
    fn shape(&self) -> DictionaryShape;

    /// The type [`materialize`](Self::materialize) returns.
    fn dictionary_info(&self) -> &'static TypeInfo;

    fn key_info(&self) -> &'static TypeInfo;

    fn value_info(&self) -> &'static TypeInfo;

    /// Insert an entry, replacing the value of an equal key.
    fn insert(
        &mut self,
        key: Box<dyn Transcode>,
        value: Box<dyn Transcode>,
    ) -> Result<(), TranscodeError>;

    fn count(&self) -> usize;

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_>;

    /// Whether an entry with an equal key exists. A key of a foreign type
    /// is never contained.
    fn contains_key(&self, key: &dyn Transcode) -> bool;

    /// Remove the entry of an equal key, returns whether one existed.
    fn remove(&mut self, key: &dyn Transcode) -> Result<bool, TranscodeError>;

    fn clear(&mut self) -> Result<(), TranscodeError>;

    /// Consume the adapter and return the dictionary in its declared shape.
    fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError>;
}

// -----------------------------------------------------------------------------
// MapLike

/// A mutable dictionary that can be built entry by entry.
pub trait MapLike: Dictionary + Typed + Default {
    const SHAPE: DictionaryShape;

    type Key: Transcode + Typed;

    type Value: Transcode + Typed;

    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);

    fn contains_entry(&self, key: &dyn Transcode) -> bool;

    fn remove_entry(&mut self, key: &dyn Transcode) -> bool;

    fn clear_entries(&mut self);
}

// -----------------------------------------------------------------------------
// MapWrapper

/// Adapter over a mutable [`MapLike`] dictionary.
#[derive(Debug, Default)]
pub struct MapWrapper<M> {
    inner: M,
}

impl<M: MapLike> MapWrapper<M> {
    /// Wrap an existing dictionary.
    #[inline]
    pub const fn new(inner: M) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: MapLike> DictionaryAdapter for MapWrapper<M> {
    #[inline]
    fn shape(&self) -> DictionaryShape {
        M::SHAPE
    }

    #[inline]
    fn dictionary_info(&self) -> &'static TypeInfo {
        M::type_info()
    }

    #[inline]
    fn key_info(&self) -> &'static TypeInfo {
        <M::Key as Typed>::type_info()
    }

    #[inline]
    fn value_info(&self) -> &'static TypeInfo {
        <M::Value as Typed>::type_info()
    }

    fn insert(
        &mut self,
        key: Box<dyn Transcode>,
        value: Box<dyn Transcode>,
    ) -> Result<(), TranscodeError> {
        let key = take_item::<M::Key>(key)?;
        let value = take_item::<M::Value>(value)?;
        self.inner.insert_entry(key, value);
        Ok(())
    }

    #[inline]
    fn count(&self) -> usize {
        Dictionary::count(&self.inner)
    }

    #[inline]
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_> {
        self.inner.entries()
    }

    #[inline]
    fn contains_key(&self, key: &dyn Transcode) -> bool {
        self.inner.contains_entry(key)
    }

    #[inline]
    fn remove(&mut self, key: &dyn Transcode) -> Result<bool, TranscodeError> {
        Ok(self.inner.remove_entry(key))
    }

    #[inline]
    fn clear(&mut self) -> Result<(), TranscodeError> {
        self.inner.clear_entries();
        Ok(())
    }

    #[inline]
    fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError> {
        Ok(Box::new(self.inner))
    }
}

// -----------------------------------------------------------------------------
// ReadOnlyView

/// Adapter over a [`ReadOnlyMap`]. Reads pass through, mutations fail.
#[derive(Debug)]
pub struct ReadOnlyView<K, V> {
    inner: ReadOnlyMap<K, V>,
}

impl<K, V> ReadOnlyView<K, V>
where
    K: Transcode + Typed + Eq + core::hash::Hash,
    V: Transcode + Typed,
{
    #[inline]
    pub const fn new(inner: ReadOnlyMap<K, V>) -> Self {
        Self { inner }
    }

    fn read_only(&self, operation: &'static str) -> TranscodeError {
        CapabilityError::ReadOnly {
            ty: self.dictionary_info().type_path(),
            operation,
        }
        .into()
    }
}

impl<K, V> Default for ReadOnlyView<K, V>
where
    K: Transcode + Typed + Eq + core::hash::Hash,
    V: Transcode + Typed,
{
    #[inline]
    fn default() -> Self {
        Self::new(ReadOnlyMap::default())
    }
}

impl<K, V> DictionaryAdapter for ReadOnlyView<K, V>
where
    K: Transcode + Typed + Eq + core::hash::Hash,
    V: Transcode + Typed,
{
    #[inline]
    fn shape(&self) -> DictionaryShape {
        DictionaryShape::ReadOnly
    }

    #[inline]
    fn dictionary_info(&self) -> &'static TypeInfo {
        <ReadOnlyMap<K, V>>::type_info()
    }

    #[inline]
    fn key_info(&self) -> &'static TypeInfo {
        K::type_info()
    }

    #[inline]
    fn value_info(&self) -> &'static TypeInfo {
        V::type_info()
    }

    fn insert(
        &mut self,
        _key: Box<dyn Transcode>,
        _value: Box<dyn Transcode>,
    ) -> Result<(), TranscodeError> {
        Err(self.read_only("insert"))
    }

    #[inline]
    fn count(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_> {
        self.inner.entries()
    }

    fn contains_key(&self, key: &dyn Transcode) -> bool {
        key.downcast_ref::<K>()
            .is_some_and(|key| self.inner.contains_key(key))
    }

    fn remove(&mut self, _key: &dyn Transcode) -> Result<bool, TranscodeError> {
        Err(self.read_only("remove"))
    }

    fn clear(&mut self) -> Result<(), TranscodeError> {
        Err(self.read_only("clear"))
    }

    #[inline]
    fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError> {
        Ok(Box::new(self.inner))
    }
}

// -----------------------------------------------------------------------------
// ReadOnlyStaging

/// Mutable staging area for a [`ReadOnlyMap`], frozen on materialization.
///
/// This is how the reverse transcoder rebuilds read-only dictionaries.
#[derive(Debug)]
pub struct ReadOnlyStaging<K, V> {
    staging: MapWrapper<hashbrown::HashMap<K, V, FixedState>>,
}

impl<K, V> Default for ReadOnlyStaging<K, V>
where
    K: Transcode + Typed + Eq + core::hash::Hash,
    V: Transcode + Typed,
{
    #[inline]
    fn default() -> Self {
        Self {
            staging: MapWrapper::new(hashbrown::HashMap::with_hasher(FixedState::default())),
        }
    }
}

impl<K, V> DictionaryAdapter for ReadOnlyStaging<K, V>
where
    K: Transcode + Typed + Eq + core::hash::Hash,
    V: Transcode + Typed,
{
    #[inline]
    fn shape(&self) -> DictionaryShape {
        DictionaryShape::ReadOnly
    }

    #[inline]
    fn dictionary_info(&self) -> &'static TypeInfo {
        <ReadOnlyMap<K, V>>::type_info()
    }

    #[inline]
    fn key_info(&self) -> &'static TypeInfo {
        K::type_info()
    }

    #[inline]
    fn value_info(&self) -> &'static TypeInfo {
        V::type_info()
    }

    #[inline]
    fn insert(
        &mut self,
        key: Box<dyn Transcode>,
        value: Box<dyn Transcode>,
    ) -> Result<(), TranscodeError> {
        self.staging.insert(key, value)
    }

    #[inline]
    fn count(&self) -> usize {
        self.staging.count()
    }

    #[inline]
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_> {
        self.staging.iter()
    }

    #[inline]
    fn contains_key(&self, key: &dyn Transcode) -> bool {
        self.staging.contains_key(key)
    }

    #[inline]
    fn remove(&mut self, key: &dyn Transcode) -> Result<bool, TranscodeError> {
        self.staging.remove(key)
    }

    #[inline]
    fn clear(&mut self) -> Result<(), TranscodeError> {
        self.staging.clear()
    }

    fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError> {
        let frozen = ReadOnlyMap::from(self.staging.into_inner());
        Ok(Box::new(frozen))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DictionaryAdapter, MapWrapper, ReadOnlyStaging, ReadOnlyView};
    use crate::collections::ReadOnlyMap;
    use crate::info::DictionaryShape;
    use crate::{CapabilityError, Transcode, TranscodeError};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use std::collections::HashMap;

    #[test]
    fn typed_map_mutation() {
        let mut adapter = MapWrapper::<HashMap<String, i32>>::default();
        assert_eq!(adapter.shape(), DictionaryShape::Map);
        adapter
            .insert(String::from("a").into_boxed_transcode(), 1_i32.into_boxed_transcode())
            .unwrap();
        adapter
            .insert(String::from("a").into_boxed_transcode(), 2_i32.into_boxed_transcode())
            .unwrap();
        assert_eq!(adapter.count(), 1);
        assert!(adapter.contains_key(&String::from("a")));
        assert!(!adapter.contains_key(&1_i32));

        let map = Box::new(adapter).materialize().unwrap().take::<HashMap<String, i32>>().unwrap();
        assert_eq!(map.get("a"), Some(&2));
    }

    #[test]
    fn ordered_map_remove_and_clear() {
        let mut adapter = MapWrapper::<BTreeMap<i32, bool>>::default();
        for n in 0..3 {
            adapter
                .insert(n.into_boxed_transcode(), true.into_boxed_transcode())
                .unwrap();
        }
        assert!(adapter.remove(&1_i32).unwrap());
        assert!(!adapter.remove(&1_i32).unwrap());
        assert_eq!(adapter.count(), 2);
        adapter.clear().unwrap();
        assert_eq!(adapter.count(), 0);
    }

    #[test]
    fn read_only_map_rejects_mutation() {
        let map: ReadOnlyMap<i32, i32> = [(1, 10)].into_iter().collect();
        let mut adapter = ReadOnlyView::new(map);
        assert!(adapter.contains_key(&1_i32));
        assert_eq!(adapter.count(), 1);

        let err = adapter
            .insert(2_i32.into_boxed_transcode(), 20_i32.into_boxed_transcode())
            .unwrap_err();
        assert!(matches!(
            err,
            TranscodeError::Capability(CapabilityError::ReadOnly { operation: "insert", .. })
        ));
        assert!(matches!(
            adapter.remove(&1_i32),
            Err(TranscodeError::Capability(CapabilityError::ReadOnly { operation: "remove", .. }))
        ));
        assert!(matches!(
            adapter.clear(),
            Err(TranscodeError::Capability(CapabilityError::ReadOnly { operation: "clear", .. }))
        ));
        assert_eq!(adapter.count(), 1);
    }

    #[test]
    fn staging_freezes_into_a_read_only_map() {
        let mut adapter = ReadOnlyStaging::<i32, String>::default();
        adapter
            .insert(7_i32.into_boxed_transcode(), String::from("seven").into_boxed_transcode())
            .unwrap();
        let map = Box::new(adapter).materialize().unwrap().take::<ReadOnlyMap<i32, String>>().unwrap();
        assert_eq!(map.get(&7).map(String::as_str), Some("seven"));
        assert_eq!(map.len(), 1);
    }
}
