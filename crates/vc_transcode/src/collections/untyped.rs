use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::adapter::{Growable, Indexed, MapLike, indexed_adapter, map_adapter};
use crate::collections::AnyValue;
use crate::info::{CollectionInfo, CollectionShape, DictionaryInfo, DictionaryShape};
use crate::info::{NonGenericTypeInfoCell, PairInfo, PairKind, TypeInfo, Typed};
use crate::ops::{Collection, Dictionary, Pair};
use crate::transcode::impl_transcode_cast_fn;
use crate::{Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// UntypedList

/// An ordered list of heterogeneous values.
///
/// The reverse transcoder materializes one when a sequence is assigned to
/// an [`AnyValue`] member.
#[derive(Debug, Default)]
pub struct UntypedList {
    items: Vec<AnyValue>,
}

impl UntypedList {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, value: AnyValue) {
        self.items.push(value);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&AnyValue> {
        self.items.get(index)
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
    pub fn iter(&self) -> core::slice::Iter<'_, AnyValue> {
        self.items.iter()
    }

    #[inline]
    pub fn into_inner(self) -> Vec<AnyValue> {
        self.items
    }
}

impl FromIterator<AnyValue> for UntypedList {
    fn from_iter<I: IntoIterator<Item = AnyValue>>(iter: I) -> Self {
        Self {
            items: Vec::from_iter(iter),
        }
    }
}

impl Typed for UntypedList {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Collection(CollectionInfo::new::<Self, AnyValue>(
                CollectionShape::Untyped,
                indexed_adapter::<Self>,
            ))
        })
    }
}

impl Transcode for UntypedList {
    impl_transcode_cast_fn!(Collection);
}

impl Collection for UntypedList {
    #[inline]
    fn count(&self) -> usize {
        self.items.len()
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
        Box::new(self.items.iter().map(|item| item as &dyn Transcode))
    }
}

impl Growable for UntypedList {
    const SHAPE: CollectionShape = CollectionShape::Untyped;

    type Item = AnyValue;

    #[inline]
    fn push_item(&mut self, item: AnyValue) {
        self.items.push(item);
    }

    #[inline]
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &AnyValue> + '_> {
        Box::new(self.items.iter())
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

impl Indexed for UntypedList {
    #[inline]
    fn get_item(&self, index: usize) -> Option<&AnyValue> {
        self.items.get(index)
    }

    #[inline]
    fn insert_item(&mut self, index: usize, item: AnyValue) {
        self.items.insert(index, item);
    }

    #[inline]
    fn remove_item(&mut self, index: usize) -> Option<AnyValue> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

// -----------------------------------------------------------------------------
// DictionaryEntry

/// An entry of an [`UntypedMap`].
#[derive(Debug, Default)]
pub struct DictionaryEntry {
    pub key: AnyValue,
    pub value: AnyValue,
}

impl DictionaryEntry {
    #[inline]
    pub const fn new(key: AnyValue, value: AnyValue) -> Self {
        Self { key, value }
    }
}

fn construct_entry(
    key: Box<dyn Transcode>,
    value: Box<dyn Transcode>,
) -> Result<Box<dyn Transcode>, TranscodeError> {
    let entry = DictionaryEntry::new(AnyValue::from_boxed(key), AnyValue::from_boxed(value));
    Ok(Box::new(entry))
}

impl Typed for DictionaryEntry {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Pair(
                PairInfo::new::<Self, AnyValue, AnyValue>(PairKind::Entry)
                    .with_constructor(construct_entry),
            )
        })
    }
}

impl Transcode for DictionaryEntry {
    impl_transcode_cast_fn!(Pair);
}

impl Pair for DictionaryEntry {
    #[inline]
    fn key(&self) -> &dyn Transcode {
        &self.key
    }

    #[inline]
    fn value(&self) -> &dyn Transcode {
        &self.value
    }
}

// -----------------------------------------------------------------------------
// UntypedMap

/// A dictionary of heterogeneous keys and values, kept in insertion order.
///
/// Keys are compared by their atomic value. A key without an atomic form
/// never equals another key.
///
/// ```
/// use vc_transcode::collections::{AnyValue, UntypedMap};
///
/// let mut map = UntypedMap::new();
/// map.insert(AnyValue::new(1_i32), AnyValue::new("one".to_string()));
/// map.insert(AnyValue::new(1_i32), AnyValue::new("uno".to_string()));
///
/// assert_eq!(map.len(), 1);
/// let value = map.get(&1_i32).unwrap();
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "uno");
/// ```
#[derive(Debug, Default)]
pub struct UntypedMap {
    entries: Vec<DictionaryEntry>,
}

impl UntypedMap {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &dyn Transcode) -> Option<usize> {
        let key = AnyValue::atomic_of(key)?;
        self.entries
            .iter()
            .position(|entry| AnyValue::atomic_of(&entry.key).is_some_and(|k| k == key))
    }

    /// Insert an entry, replacing the value of an equal key.
    pub fn insert(&mut self, key: AnyValue, value: AnyValue) {
        match self.position(&key) {
            Some(index) => self.entries[index].value = value,
            None => self.entries.push(DictionaryEntry::new(key, value)),
        }
    }

    pub fn get(&self, key: &dyn Transcode) -> Option<&AnyValue> {
        self.position(key).map(|index| &self.entries[index].value)
    }

    #[inline]
    pub fn contains_key(&self, key: &dyn Transcode) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &dyn Transcode) -> Option<AnyValue> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }
}

impl Typed for UntypedMap {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Dictionary(DictionaryInfo::new::<Self, AnyValue, AnyValue, DictionaryEntry>(
                DictionaryShape::Untyped,
                map_adapter::<Self>,
            ))
        })
    }
}

impl Transcode for UntypedMap {
    impl_transcode_cast_fn!(Dictionary);
}

impl Dictionary for UntypedMap {
    #[inline]
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|entry| (&entry.key as &dyn Transcode, &entry.value as &dyn Transcode)),
        )
    }
}

impl MapLike for UntypedMap {
    const SHAPE: DictionaryShape = DictionaryShape::Untyped;

    type Key = AnyValue;

    type Value = AnyValue;

    #[inline]
    fn insert_entry(&mut self, key: AnyValue, value: AnyValue) {
        self.insert(key, value);
    }

    #[inline]
    fn contains_entry(&self, key: &dyn Transcode) -> bool {
        self.contains_key(key)
    }

    #[inline]
    fn remove_entry(&mut self, key: &dyn Transcode) -> bool {
        self.remove(key).is_some()
    }

    #[inline]
    fn clear_entries(&mut self) {
        self.entries.clear();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DictionaryEntry, UntypedList, UntypedMap};
    use crate::collections::AnyValue;
    use crate::info::{TypeClass, Typed, classify};
    use crate::ops::Pair;
    use alloc::string::String;

    #[test]
    fn untyped_list_keeps_order() {
        let list: UntypedList = [AnyValue::new(1_i32), AnyValue::new(String::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().downcast_ref::<i32>(), Some(&1));
        assert_eq!(classify(UntypedList::type_info()), TypeClass::Collection);
    }

    #[test]
    fn untyped_map_compares_atomic_keys() {
        let mut map = UntypedMap::new();
        map.insert(AnyValue::new(2_u8), AnyValue::new(true));
        map.insert(AnyValue::new(Some(2_u8)), AnyValue::new(false));
        map.insert(AnyValue::new(2_i64), AnyValue::null());

        // `2_u8` and `Some(2_u8)` share an atomic form, `2_i64` does not.
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2_u8).unwrap().downcast_ref::<bool>(), Some(&false));
        assert!(map.remove(&2_i64).unwrap().is_null());
        assert!(!map.contains_key(&2_i64));
    }

    #[test]
    fn entry_slots() {
        let entry = DictionaryEntry::new(AnyValue::new('k'), AnyValue::new(1.5_f64));
        assert!(entry.key().is::<AnyValue>());
        assert_eq!(classify(DictionaryEntry::type_info()), TypeClass::DictionaryEntry);
    }
}
