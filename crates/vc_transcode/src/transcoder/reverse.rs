//! Dynamic representation back to a concrete graph.

use alloc::boxed::Box;

use crate::cache::MemberDescriptor;
use crate::coerce::{Coerced, coerce};
use crate::collections::{AnyValue, UntypedList, UntypedMap};
use crate::info::{
    AtomicInfo, NullableInfo, PairInfo, TypeClass, TypeInfo, Typed, classify, is_dictionary,
    is_pair, is_stack,
};
use crate::ops::{Composite, TranscodeMut};
use crate::transcoder::walk::{Segment, Walk};
use crate::value::{DynamicObject, Value};
use crate::{CoerceError, ShapeError, Transcode, TranscodeError};

fn unexpected(target: &'static TypeInfo, expected: &'static str) -> TranscodeError {
    ShapeError::UnexpectedValue {
        ty: target.type_path(),
        expected,
    }
    .into()
}

fn unrecognized(target: &'static TypeInfo) -> TranscodeError {
    ShapeError::UnrecognizedShape {
        ty: target.type_path(),
    }
    .into()
}

/// Whether every element is a key/value object, as dictionaries are represented.
fn is_entry_sequence(items: &[Value]) -> bool {
    !items.is_empty()
        && items.iter().all(|item| {
            item.as_object()
                .is_some_and(|object| is_pair(object.represented_type()))
        })
}

fn rejected(expected: &'static TypeInfo, value: &dyn Transcode) -> TranscodeError {
    TranscodeError::mismatched(expected.type_path(), value.dyn_type_info().type_path())
}

fn pair_slot<'o>(
    object: &'o DynamicObject,
    pair: &'static TypeInfo,
    slot: &'static str,
) -> Result<&'o Value, TranscodeError> {
    object.get_member(slot).ok_or_else(|| {
        ShapeError::MissingPairSlot {
            ty: pair.type_path(),
            slot,
        }
        .into()
    })
}

/// The composite a nested object can be written into without rebuilding it.
fn in_place(slot: &mut dyn Transcode) -> Option<&mut dyn Composite> {
    match slot.transcode_mut() {
        TranscodeMut::Composite(composite) => Some(composite),
        TranscodeMut::Nullable(nullable) => nullable.get_mut().and_then(in_place),
        _ => None,
    }
}

/// Wrap the output of a member converter declared for `T` on an `Option<T>` member.
fn fit_nullable(
    declared: &'static TypeInfo,
    value: Box<dyn Transcode>,
) -> Result<Box<dyn Transcode>, TranscodeError> {
    match declared {
        TypeInfo::Nullable(nullable) if value.ty_id() != declared.type_id() => {
            nullable.some(value).map_err(|value| rejected(declared, &*value))
        }
        _ => Ok(value),
    }
}

impl Walk<'_> {
    /// Write `object` into the root `destination`.
    ///
    /// The object must stand for the destination's type.
    pub(super) fn map_root(
        &mut self,
        object: &DynamicObject,
        destination: &mut dyn Transcode,
    ) -> Result<(), TranscodeError> {
        let expected = destination.dyn_type_info();
        let original = object.original_type();
        if original.type_id() != expected.type_id() {
            return Err(TranscodeError::mismatched(
                expected.type_path(),
                original.type_path(),
            ));
        }

        match destination.transcode_mut() {
            TranscodeMut::Composite(composite) if !object.is_converted() => {
                self.fill_composite(object, composite)
            }
            _ => {
                let built = self.object_value(object, expected)?;
                destination.set(built).map_err(|value| rejected(expected, &*value))
            }
        }
    }

    /// Build a fresh instance of the type the object stands for.
    pub(super) fn build_root(
        &mut self,
        object: &DynamicObject,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        self.object_value(object, object.original_type())
    }

    /// Assign the members present in `object` to `composite`.
    ///
    /// Absent members keep their value. Failures are recorded per member.
    fn fill_composite(
        &mut self,
        object: &DynamicObject,
        composite: &mut dyn Composite,
    ) -> Result<(), TranscodeError> {
        let info = composite.dyn_type_info();
        let represented = object.represented_type();
        if represented.type_id() != info.type_id() {
            return Err(TranscodeError::mismatched(
                info.type_path(),
                represented.type_path(),
            ));
        }

        for member in self.cache.members_for(info)? {
            let Some(value) = object.get_member(member.name()) else {
                continue;
            };
            // Force-included read-only members are only read.
            if !member.is_writable() {
                continue;
            }
            self.at(Segment::Member(member.name()), |walk| {
                if let Err(error) = walk.assign(composite, member, value) {
                    walk.skip(error);
                }
            });
        }
        Ok(())
    }

    fn assign(
        &mut self,
        composite: &mut dyn Composite,
        member: &MemberDescriptor,
        value: &Value,
    ) -> Result<(), TranscodeError> {
        if let Value::Object(object) = value
            && !object.is_converted()
            && member.conversion().is_none()
            && let Some(target) = composite.member_mut(member.index()).and_then(in_place)
        {
            return self.nested(|walk| walk.fill_composite(object, target));
        }

        let built = self.member_value_for(member, value)?;
        composite
            .set_member(member.index(), built)
            .map_err(|value| rejected(member.type_info(), &*value))
    }

    fn member_value_for(
        &mut self,
        member: &MemberDescriptor,
        value: &Value,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        let declared = member.type_info();
        let carries_provenance = value.as_object().is_some_and(DynamicObject::is_converted);
        match self.cache.converter_for_member(member) {
            Some(conversion) if !carries_provenance && !value.is_null() => {
                let converted = self.value_for(value, conversion.converted_info())?;
                let original = conversion.convert_back(converted)?;
                fit_nullable(declared, original)
            }
            _ => {
                let built = self.value_for(value, declared)?;
                fit_nullable(declared, built)
            }
        }
    }

    /// Build a value of the `target` type from its representation.
    pub(super) fn value_for(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        self.nested(|walk| walk.value_for_inner(value, target))
    }

    fn value_for_inner(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        match (target, value) {
            (TypeInfo::Nullable(nullable), _) => {
                return self.nullable_for(value, target, nullable);
            }
            (TypeInfo::Abstract(_), Value::Null) => return Ok(Box::new(AnyValue::null())),
            (TypeInfo::Abstract(_), _) => {
                let inner = self.dynamic_value(value)?;
                return Ok(Box::new(AnyValue::from_boxed(inner)));
            }
            (_, Value::Null) => {
                return Err(ShapeError::NotNullable {
                    ty: target.type_path(),
                }
                .into());
            }
            (_, Value::Object(object)) if object.is_converted() => {
                return self.object_value(object, target);
            }
            _ => {}
        }

        if let Some(conversion) = self.cache.converter_for_type(target) {
            let converted = self.value_for(value, conversion.converted_info())?;
            return conversion.convert_back(converted);
        }

        match classify(target) {
            TypeClass::Atomic => match target.as_atomic() {
                Some(info) => self.atomic_for(value, target, info),
                None => Err(unrecognized(target)),
            },
            TypeClass::Collection | TypeClass::Dictionary if is_dictionary(target) => match value {
                Value::Sequence(items) => self.dictionary_for(items, target),
                _ => Err(unexpected(target, "sequence")),
            },
            TypeClass::Collection | TypeClass::Dictionary => match value {
                Value::Sequence(items) => self.collection_for(items, target),
                _ => Err(unexpected(target, "sequence")),
            },
            TypeClass::KeyValue | TypeClass::DictionaryEntry | TypeClass::Composite => match value {
                Value::Object(object) => self.object_value(object, target),
                _ => Err(unexpected(target, "object")),
            },
        }
    }

    /// A soft coercion failure into an optional atomic yields `None`.
    fn nullable_for(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
        nullable: &NullableInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        if value.is_null() {
            return Ok(nullable.none());
        }
        match self.value_for(value, nullable.inner()) {
            Ok(inner) => nullable.some(inner).map_err(|inner| rejected(target, &*inner)),
            Err(TranscodeError::Coerce(_))
                if value.as_atomic().is_some() && nullable.inner().as_atomic().is_some() =>
            {
                Ok(nullable.none())
            }
            Err(error) => Err(error),
        }
    }

    fn atomic_for(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
        info: &AtomicInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        if value.as_atomic().is_none() {
            return Err(CoerceError::NotAtomic {
                ty: target.type_path(),
            }
            .into());
        }
        match coerce(value.clone(), target) {
            Coerced::Converted(Value::Atomic(atomic)) | Coerced::Unchanged(Value::Atomic(atomic)) => {
                info.construct(atomic)
            }
            Coerced::Null(error) => Err(error
                .unwrap_or(CoerceError::Null {
                    ty: target.type_path(),
                })
                .into()),
            _ => Err(unexpected(target, "atomic")),
        }
    }

    fn collection_for(
        &mut self,
        items: &[Value],
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        let info = target.as_collection().ok_or_else(|| unrecognized(target))?;
        let mut adapter = info.new_adapter();
        let item_info = info.item_info();
        for (index, item) in items.iter().enumerate() {
            self.at(Segment::Index(index), |walk| {
                let added = walk
                    .value_for(item, item_info)
                    .and_then(|item| adapter.add(item));
                if let Err(error) = added {
                    walk.skip(error);
                }
            });
        }
        // Filled in pop order, a stack is reversed once.
        if is_stack(target) {
            adapter.reverse();
        }
        adapter.materialize()
    }

    fn dictionary_for(
        &mut self,
        items: &[Value],
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        let info = target.as_dictionary().ok_or_else(|| unrecognized(target))?;
        let mut adapter = info.new_staging_adapter();
        let pair_info = info.pair_info();
        for (index, item) in items.iter().enumerate() {
            self.at(Segment::Index(index), |walk| {
                let inserted = match item {
                    Value::Object(entry) => walk
                        .pair_parts(entry, pair_info, info.key_info(), info.value_info())
                        .and_then(|(key, value)| adapter.insert(key, value)),
                    _ => Err(unexpected(pair_info, "object")),
                };
                if let Err(error) = inserted {
                    walk.skip(error);
                }
            });
        }
        adapter.materialize()
    }

    fn pair_parts(
        &mut self,
        object: &DynamicObject,
        pair: &'static TypeInfo,
        key_info: &'static TypeInfo,
        value_info: &'static TypeInfo,
    ) -> Result<(Box<dyn Transcode>, Box<dyn Transcode>), TranscodeError> {
        let key = pair_slot(object, pair, PairInfo::KEY)?;
        let value = pair_slot(object, pair, PairInfo::VALUE)?;
        let key = self.at(Segment::Member(PairInfo::KEY), |walk| walk.value_for(key, key_info))?;
        let value = self.at(Segment::Member(PairInfo::VALUE), |walk| {
            walk.value_for(value, value_info)
        })?;
        Ok((key, value))
    }

    /// Build an object into `target`, through the recorded conversion if any.
    fn object_value(
        &mut self,
        object: &DynamicObject,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        let Some(conversion) = object.converter() else {
            return self.unconverted_object_value(object, target);
        };
        let original = conversion.original_info();
        if original.type_id() != target.type_id() {
            return Err(TranscodeError::mismatched(
                target.type_path(),
                original.type_path(),
            ));
        }
        let converted = self.unconverted_object_value(object, conversion.converted_info())?;
        conversion.convert_back(converted)
    }

    fn unconverted_object_value(
        &mut self,
        object: &DynamicObject,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        match target {
            TypeInfo::Pair(pair) => {
                let key_info = pair.key_member().type_info();
                let value_info = pair.value_member().type_info();
                let (key, value) = self.pair_parts(object, target, key_info, value_info)?;
                pair.construct(key, value)
            }
            TypeInfo::Composite(composite) => {
                let mut instance = composite.new_default().ok_or(ShapeError::NotConstructible {
                    ty: target.type_path(),
                })?;
                match instance.transcode_mut() {
                    TranscodeMut::Composite(fields) => self.fill_composite(object, fields)?,
                    _ => return Err(unexpected(target, "composite")),
                }
                Ok(instance)
            }
            TypeInfo::Atomic(_) => Err(unexpected(target, "atomic")),
            TypeInfo::Collection(_) | TypeInfo::Dictionary(_) => Err(unexpected(target, "sequence")),
            TypeInfo::Nullable(_) | TypeInfo::Abstract(_) | TypeInfo::Opaque(_) => {
                Err(ShapeError::NotComposite {
                    ty: target.type_path(),
                }
                .into())
            }
        }
    }

    /// The concrete value behind an abstract member, resolved from the
    /// representation alone.
    ///
    /// A non-empty sequence of pair objects was a dictionary and becomes an
    /// [`UntypedMap`], any other sequence an [`UntypedList`].
    fn dynamic_value(&mut self, value: &Value) -> Result<Box<dyn Transcode>, TranscodeError> {
        match value {
            Value::Null => Ok(Box::new(AnyValue::null())),
            Value::Atomic(atomic) => atomic.clone().into_transcode(),
            Value::Object(object) => self.object_value(object, object.original_type()),
            Value::Sequence(items) if is_entry_sequence(items) => {
                self.dictionary_for(items, UntypedMap::type_info())
            }
            Value::Sequence(items) => self.collection_for(items, UntypedList::type_info()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::cache::MetadataCache;
    use crate::collections::{AnyValue, ReadOnlyMap, Stack, UntypedList, UntypedMap};
    use crate::info::Typed;
    use crate::transcoder::{TranscodeConfig, Transcoder};
    use crate::value::{DynamicObject, Value};
    use crate::{ShapeError, Transcode, TranscodeError};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    #[derive(Transcode, Default, Debug, PartialEq)]
    struct Inner {
        a: i32,
        b: Option<i32>,
    }

    #[derive(Transcode, Default)]
    struct Outer {
        inner: Inner,
        items: Vec<Inner>,
        stack: Stack<u8>,
        lookup: ReadOnlyMap<String, i64>,
        any: AnyValue,
    }

    fn quiet(cache: &MetadataCache) -> Transcoder<'_> {
        Transcoder::new(cache).with_config(TranscodeConfig::new().with_log_skipped(false))
    }

    #[test]
    fn round_trip_of_nested_shapes() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let source = Outer {
            inner: Inner { a: 1, b: Some(2) },
            items: vec![Inner { a: 3, b: None }],
            stack: [4_u8, 5, 6].into_iter().collect(),
            lookup: ReadOnlyMap::from_iter([(String::from("x"), 7_i64)]),
            any: AnyValue::new(String::from("free")),
        };

        let object = transcoder.to_dynamic(&source).unwrap().into_inner();
        let done = transcoder.map::<Outer>(&object).unwrap();
        assert!(done.is_complete());
        let copy = done.into_inner();

        assert_eq!(copy.inner, source.inner);
        assert_eq!(copy.items, source.items);
        assert_eq!(copy.stack.iter().collect::<Vec<_>>(), [&6, &5, &4]);
        assert_eq!(copy.lookup.get(&String::from("x")), Some(&7));
        assert_eq!(copy.any.downcast_ref::<String>().unwrap(), "free");
    }

    #[test]
    fn partial_failure_keeps_the_rest() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let mut object = DynamicObject::new(Inner::type_info());
        object.insert("a", Value::from("not a number"));
        object.insert("b", Value::from("also not"));

        let mut destination = Inner { a: 10, b: Some(20) };
        let done = transcoder.map_into(&object, &mut destination).unwrap();
        assert_eq!(done.skipped().len(), 1);
        assert_eq!(done.skipped()[0].path, "a");
        // the nullable member coerced to null
        assert_eq!(destination, Inner { a: 10, b: None });
    }

    #[test]
    fn absent_and_null_members() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let mut object = DynamicObject::new(Inner::type_info());
        object.insert("a", Value::Null);

        let mut destination = Inner { a: 1, b: Some(2) };
        let done = transcoder.map_into(&object, &mut destination).unwrap();
        assert!(matches!(
            done.skipped()[0].error,
            TranscodeError::Shape(ShapeError::NotNullable { .. })
        ));
        assert_eq!(destination, Inner { a: 1, b: Some(2) });
    }

    #[test]
    fn nested_objects_are_filled_in_place() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let mut inner = DynamicObject::new(Inner::type_info());
        inner.insert("a", Value::from(5));
        let mut object = DynamicObject::new(Outer::type_info());
        object.insert("inner", Value::Object(inner));

        let mut destination = Outer {
            inner: Inner { a: 0, b: Some(9) },
            ..Outer::default()
        };
        transcoder.map_into(&object, &mut destination).unwrap();
        assert_eq!(destination.inner, Inner { a: 5, b: Some(9) });
    }

    #[test]
    fn mismatched_roots_are_rejected() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let object = DynamicObject::new(Inner::type_info());
        let mut destination = Outer::default();
        let err = transcoder.map_into(&object, &mut destination).unwrap_err();
        assert!(matches!(err, TranscodeError::Shape(ShapeError::MismatchedTypes { .. })));
    }

    #[test]
    fn abstract_members_resolve_from_the_representation() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let mut object = DynamicObject::new(Outer::type_info());
        object.insert("any", Value::from(vec![Value::from(1_u8), Value::from("two")]));

        let outer = transcoder.map::<Outer>(&object).unwrap().into_inner();
        let list = outer.any.downcast_ref::<UntypedList>().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).and_then(|item| item.downcast_ref::<u8>()), Some(&1));

        let built = transcoder.map_dynamic(&object).unwrap().into_inner();
        assert!(built.is::<Outer>());
    }

    #[test]
    fn abstract_dictionaries_come_back_as_maps() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let source = Outer {
            any: AnyValue::new(HashMap::from([(String::from("k"), 1_i32)])),
            ..Outer::default()
        };

        let object = transcoder.to_dynamic(&source).unwrap().into_inner();
        let done = transcoder.map::<Outer>(&object).unwrap();
        assert!(done.is_complete(), "{:?}", done.skipped());
        let outer = done.into_inner();
        let map = outer.any.downcast_ref::<UntypedMap>().unwrap();
        assert_eq!(map.len(), 1);
        let value = map.get(&String::from("k")).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&1));

        // no entries to recognize
        let mut empty = DynamicObject::new(Outer::type_info());
        empty.insert("any", Value::from(Vec::<Value>::new()));
        let outer = transcoder.map::<Outer>(&empty).unwrap().into_inner();
        assert!(outer.any.downcast_ref::<UntypedList>().is_some());
    }
}
