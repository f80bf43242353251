use core::fmt;

use crate::info::{Capabilities, TypeInfo};

// -----------------------------------------------------------------------------
// TypeClass

/// The category a type falls into for transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Atomic,
    Collection,
    Dictionary,
    KeyValue,
    DictionaryEntry,
    Composite,
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic => f.pad("Atomic"),
            Self::Collection => f.pad("Collection"),
            Self::Dictionary => f.pad("Dictionary"),
            Self::KeyValue => f.pad("KeyValue"),
            Self::DictionaryEntry => f.pad("DictionaryEntry"),
            Self::Composite => f.pad("Composite"),
        }
    }
}

// -----------------------------------------------------------------------------
// Predicates

/// Atomic types, and `Option<T>` where `T` is atomic.
///
/// Only one level of nullable wrapping is unwrapped, `Option<Option<i32>>`
/// is not atomic.
pub fn is_atomic(info: &TypeInfo) -> bool {
    match info {
        TypeInfo::Atomic(_) => true,
        TypeInfo::Nullable(nullable) => matches!(nullable.inner(), TypeInfo::Atomic(_)),
        _ => false,
    }
}

/// Non-atomic types with homogeneous iteration, typed or untyped.
///
/// Dictionaries are iterable too.
#[inline]
pub fn is_collection(info: &TypeInfo) -> bool {
    !is_atomic(info) && info.capabilities().contains(Capabilities::ITERABLE)
}

/// Types with key/value association, read-only and untyped ones included.
#[inline]
pub fn is_dictionary(info: &TypeInfo) -> bool {
    info.capabilities().contains(Capabilities::ASSOCIATIVE)
}

/// Collections iterated in reverse insertion order.
#[inline]
pub fn is_stack(info: &TypeInfo) -> bool {
    info.capabilities().contains(Capabilities::LIFO)
}

/// Two-slot key/value pairs and untyped dictionary entries.
#[inline]
pub fn is_pair(info: &TypeInfo) -> bool {
    info.capabilities().contains(Capabilities::PAIR)
}

// -----------------------------------------------------------------------------
// classify

/// Classify a type.
///
/// A type may satisfy several predicates. They are resolved with the fixed
/// precedence `Atomic > Collection > Dictionary > KeyValue/DictionaryEntry > Composite`,
/// so a map (iterable and associative) is a [`Collection`](TypeClass::Collection).
/// Use [`is_dictionary`] to detect the associative shape inside the collection path.
///
/// A non-atomic `Option<T>` classifies as `T`.
///
/// Both transcoders dispatch on the class, so the precedence decides the
/// representation a type gets.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use vc_transcode::info::{Typed, TypeClass, classify, is_dictionary};
///
/// assert_eq!(classify(<Option<u8>>::type_info()), TypeClass::Atomic);
///
/// let map = <HashMap<String, i32>>::type_info();
/// assert_eq!(classify(map), TypeClass::Collection);
/// assert!(is_dictionary(map));
///
/// assert_eq!(classify(<(String, i32)>::type_info()), TypeClass::KeyValue);
/// ```
pub fn classify(info: &TypeInfo) -> TypeClass {
    if is_atomic(info) {
        return TypeClass::Atomic;
    }
    let caps = info.capabilities();
    if caps.contains(Capabilities::ITERABLE) {
        TypeClass::Collection
    } else if caps.contains(Capabilities::ASSOCIATIVE) {
        TypeClass::Dictionary
    } else if caps.contains(Capabilities::ENTRY) {
        TypeClass::DictionaryEntry
    } else if caps.contains(Capabilities::PAIR) {
        TypeClass::KeyValue
    } else {
        TypeClass::Composite
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{AnyValue, DictionaryEntry, ReadOnlyMap, Stack, UntypedList, UntypedMap};
    use crate::info::Typed;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn atomic_catalogue() {
        assert_eq!(classify(bool::type_info()), TypeClass::Atomic);
        assert_eq!(classify(char::type_info()), TypeClass::Atomic);
        assert_eq!(classify(u128::type_info()), TypeClass::Atomic);
        assert_eq!(classify(f64::type_info()), TypeClass::Atomic);
        assert_eq!(classify(String::type_info()), TypeClass::Atomic);
        assert_eq!(classify(Decimal::type_info()), TypeClass::Atomic);
        assert_eq!(classify(NaiveDate::type_info()), TypeClass::Atomic);
        assert_eq!(classify(<DateTime<FixedOffset>>::type_info()), TypeClass::Atomic);
        assert_eq!(classify(TimeDelta::type_info()), TypeClass::Atomic);
        assert_eq!(classify(core::time::Duration::type_info()), TypeClass::Atomic);
        assert_eq!(classify(Uuid::type_info()), TypeClass::Atomic);
    }

    #[test]
    fn nullable_unwraps_one_level() {
        assert!(is_atomic(<Option<i32>>::type_info()));
        assert!(!is_atomic(<Option<Option<i32>>>::type_info()));
        assert_eq!(classify(<Option<Vec<i32>>>::type_info()), TypeClass::Collection);
    }

    #[test]
    fn precedence_resolves_overlaps() {
        let map = <BTreeMap<i32, String>>::type_info();
        assert!(is_collection(map));
        assert!(is_dictionary(map));
        assert_eq!(classify(map), TypeClass::Collection);

        let read_only = <ReadOnlyMap<i32, String>>::type_info();
        assert!(is_dictionary(read_only));
        assert!(read_only.capabilities().contains(Capabilities::READ_ONLY));
        assert!(is_dictionary(UntypedMap::type_info()));

        // A string is iterable in spirit but atomic wins.
        assert!(!is_collection(String::type_info()));
    }

    #[test]
    fn containers_and_pairs() {
        assert_eq!(classify(<Vec<u8>>::type_info()), TypeClass::Collection);
        assert_eq!(classify(<[u8; 4]>::type_info()), TypeClass::Collection);
        assert_eq!(classify(UntypedList::type_info()), TypeClass::Collection);
        assert!(is_stack(<Stack<u8>>::type_info()));
        assert!(!is_stack(<Vec<u8>>::type_info()));

        assert_eq!(classify(<(i32, String)>::type_info()), TypeClass::KeyValue);
        assert_eq!(classify(DictionaryEntry::type_info()), TypeClass::DictionaryEntry);
        assert!(is_pair(DictionaryEntry::type_info()));

        assert_eq!(classify(AnyValue::type_info()), TypeClass::Composite);
    }
}
