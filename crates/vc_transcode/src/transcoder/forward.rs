//! Concrete graph to dynamic representation.

use alloc::vec::Vec;

use crate::cache::MemberDescriptor;
use crate::convert::Conversion;
use crate::info::{TypeClass, TypeInfo, classify, is_dictionary};
use crate::ops::{Composite, Dictionary, TranscodeRef};
use crate::transcoder::walk::{Segment, Walk};
use crate::value::{DynamicObject, Value};
use crate::{ShapeError, Transcode, TranscodeError};

/// The value a member converter is applied to.
///
/// A converter declared for `T` on an `Option<T>` member sees the inner
/// value, `None` for an absent one.
fn convertible<'v>(
    value: &'v dyn Transcode,
    conversion: &Conversion,
) -> Option<&'v dyn Transcode> {
    if value.ty_id() == conversion.original_info().type_id() {
        return Some(value);
    }
    match value.transcode_ref() {
        TranscodeRef::Nullable(nullable) => nullable.get(),
        _ => Some(value),
    }
}

impl Walk<'_> {
    /// Transcode the root of a graph, which must be composite-like.
    pub(super) fn root_object(
        &mut self,
        value: &dyn Transcode,
    ) -> Result<DynamicObject, TranscodeError> {
        let not_composite = || ShapeError::NotComposite {
            ty: value.dyn_type_info().type_path(),
        };
        if self.cache.converter_for_type(value.dyn_type_info()).is_none()
            && matches!(
                value.transcode_ref(),
                TranscodeRef::Atomic(_)
                    | TranscodeRef::Collection(_)
                    | TranscodeRef::Dictionary(_)
                    | TranscodeRef::Opaque(_)
            )
        {
            return Err(not_composite().into());
        }
        match self.value_of(value)? {
            Value::Object(object) => Ok(object),
            _ => Err(not_composite().into()),
        }
    }

    /// Transcode any value, applying the type-level converter of its runtime type.
    pub(super) fn value_of(&mut self, value: &dyn Transcode) -> Result<Value, TranscodeError> {
        self.nested(|walk| match walk.cache.converter_for_type(value.dyn_type_info()) {
            Some(conversion) => walk.converted_value(value, conversion),
            None => walk.natural_value(value),
        })
    }

    /// Transcode the converter's output, an object records the conversion.
    fn converted_value(
        &mut self,
        value: &dyn Transcode,
        conversion: &Conversion,
    ) -> Result<Value, TranscodeError> {
        let converted = conversion.convert(value)?;
        let mut repr = self.natural_value(&*converted)?;
        if let Value::Object(object) = &mut repr {
            object.set_conversion(conversion.clone());
        }
        Ok(repr)
    }

    /// Transcode a value by its class.
    ///
    /// Wrappers (nullable, abstract) are transparent. Everything else goes
    /// through [`classify`], and the runtime shape must agree with the class:
    /// a map is a collection whose associative shape becomes pair objects.
    fn natural_value(&mut self, value: &dyn Transcode) -> Result<Value, TranscodeError> {
        let info = value.dyn_type_info();
        match (classify(info), value.transcode_ref()) {
            (_, TranscodeRef::Nullable(nullable)) => match nullable.get() {
                Some(inner) => self.value_of(inner),
                None => Ok(Value::Null),
            },
            (_, TranscodeRef::Abstract(any)) => match any.get() {
                Some(inner) => self.value_of(inner),
                None => Ok(Value::Null),
            },
            (TypeClass::Atomic, TranscodeRef::Atomic(atomic)) => Ok(Value::Atomic(atomic.to_atomic())),
            (TypeClass::Collection | TypeClass::Dictionary, TranscodeRef::Dictionary(dictionary))
                if is_dictionary(info) =>
            {
                self.entries_of(dictionary)
            }
            (TypeClass::Collection, TranscodeRef::Collection(collection)) => {
                let mut items = Vec::with_capacity(collection.count());
                for (index, item) in collection.items().enumerate() {
                    self.at(Segment::Index(index), |walk| match walk.value_of(item) {
                        Ok(item) => items.push(item),
                        Err(error) => walk.skip(error),
                    });
                }
                Ok(Value::Sequence(items))
            }
            (TypeClass::KeyValue | TypeClass::DictionaryEntry, TranscodeRef::Pair(pair)) => self
                .pair_object(pair.dyn_type_info(), pair.key(), pair.value())
                .map(Value::Object),
            (TypeClass::Composite, TranscodeRef::Composite(composite)) => {
                self.composite_object(composite).map(Value::Object)
            }
            (_, TranscodeRef::Opaque(_)) => Err(ShapeError::NotComposite {
                ty: info.type_path(),
            }
            .into()),
            _ => Err(ShapeError::UnrecognizedShape {
                ty: info.type_path(),
            }
            .into()),
        }
    }

    /// A dictionary becomes a sequence of pair objects.
    fn entries_of(&mut self, dictionary: &dyn Dictionary) -> Result<Value, TranscodeError> {
        let info = dictionary.dyn_type_info();
        let Some(pair_info) = info.as_dictionary().map(|info| info.pair_info()) else {
            return Err(ShapeError::UnrecognizedShape {
                ty: info.type_path(),
            }
            .into());
        };

        let mut entries = Vec::with_capacity(dictionary.count());
        for (index, (key, value)) in dictionary.entries().enumerate() {
            self.at(Segment::Index(index), |walk| match walk.pair_object(pair_info, key, value) {
                Ok(entry) => entries.push(Value::Object(entry)),
                Err(error) => walk.skip(error),
            });
        }
        Ok(Value::Sequence(entries))
    }

    fn pair_object(
        &mut self,
        info: &'static TypeInfo,
        key: &dyn Transcode,
        value: &dyn Transcode,
    ) -> Result<DynamicObject, TranscodeError> {
        let members = self.cache.members_for(info)?;
        let mut object = DynamicObject::with_capacity(info, members.len());
        for (member, slot) in members.iter().zip([key, value]) {
            self.at(Segment::Member(member.name()), |walk| {
                match walk.member_value(member, slot) {
                    Ok(value) => object.insert(member.name(), value),
                    Err(error) => walk.skip(error),
                }
            });
        }
        Ok(object)
    }

    fn composite_object(
        &mut self,
        composite: &dyn Composite,
    ) -> Result<DynamicObject, TranscodeError> {
        let info = composite.dyn_type_info();
        let members = self.cache.members_for(info)?;
        let mut object = DynamicObject::with_capacity(info, members.len());
        for member in members {
            self.at(Segment::Member(member.name()), |walk| {
                let result = match composite.member(member.index()) {
                    Some(value) => walk.member_value(member, &*value),
                    None => Err(TranscodeError::MissingMember {
                        ty: info.type_path(),
                        member: member.name(),
                    }),
                };
                match result {
                    Ok(value) => object.insert(member.name(), value),
                    Err(error) => walk.skip(error),
                }
            });
        }
        Ok(object)
    }

    fn member_value(
        &mut self,
        member: &MemberDescriptor,
        value: &dyn Transcode,
    ) -> Result<Value, TranscodeError> {
        match self.cache.converter_for_member(member) {
            Some(conversion) => match convertible(value, conversion) {
                Some(source) => self.nested(|walk| walk.converted_value(source, conversion)),
                None => Ok(Value::Null),
            },
            None => self.value_of(value),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::cache::MetadataCache;
    use crate::collections::{AnyValue, Stack};
    use crate::transcoder::{TranscodeConfig, Transcoder};
    use crate::value::{AtomicValue, Value};
    use crate::{ShapeError, Transcode, TranscodeError};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Transcode, Default)]
    struct Leaf {
        label: String,
        weight: Option<f64>,
    }

    #[derive(Transcode, Default)]
    struct Tree {
        name: String,
        leaves: Vec<Leaf>,
        history: Stack<i32>,
        tags: BTreeMap<String, u8>,
        extra: AnyValue,
    }

    fn tree() -> Tree {
        Tree {
            name: String::from("oak"),
            leaves: vec![
                Leaf {
                    label: String::from("a"),
                    weight: Some(1.5),
                },
                Leaf {
                    label: String::from("b"),
                    weight: None,
                },
            ],
            history: [1, 2, 3].into_iter().collect(),
            tags: BTreeMap::from([(String::from("k"), 7)]),
            extra: AnyValue::new(9_u32),
        }
    }

    #[test]
    fn nested_shapes() {
        let cache = MetadataCache::new();
        let done = Transcoder::new(&cache).to_dynamic(&tree()).unwrap();
        assert!(done.is_complete());
        let object = done.into_inner();
        assert!(object.represented_type().is::<Tree>());

        let leaves = object.get_member("leaves").unwrap().as_sequence().unwrap();
        assert_eq!(leaves.len(), 2);
        let second = leaves[1].as_object().unwrap();
        assert_eq!(second.get_member("label"), Some(&Value::from("b")));
        assert_eq!(second.get_member("weight"), Some(&Value::Null));

        // pop order
        let history = object.get_member("history").unwrap().as_sequence().unwrap();
        assert_eq!(history, [Value::from(3), Value::from(2), Value::from(1)]);

        let tags = object.get_member("tags").unwrap().as_sequence().unwrap();
        let entry = tags[0].as_object().unwrap();
        assert!(entry.represented_type().is::<(String, u8)>());
        assert_eq!(entry.get_member("Key"), Some(&Value::from("k")));
        assert_eq!(entry.get_member("Value"), Some(&Value::from(7_u8)));

        // the runtime type of an abstract member
        assert_eq!(
            object.get_member("extra").unwrap().as_atomic(),
            Some(&AtomicValue::U32(9))
        );
    }

    #[test]
    fn roots_must_be_composite() {
        let cache = MetadataCache::new();
        let transcoder = Transcoder::new(&cache);
        for err in [
            transcoder.to_dynamic(&5_i32).unwrap_err(),
            transcoder.to_dynamic(&vec![1_i32]).unwrap_err(),
            transcoder.to_dynamic(&None::<Leaf>).unwrap_err(),
        ] {
            assert!(matches!(err, TranscodeError::Shape(ShapeError::NotComposite { .. })));
        }
        assert!(transcoder.to_dynamic(&(1_i32, 2_i32)).is_ok());
        assert!(transcoder.to_value(&5_i32).is_ok());
    }

    #[test]
    fn depth_limit_skips_the_member() {
        let cache = MetadataCache::new();
        let config = TranscodeConfig::new().with_max_depth(2).with_log_skipped(false);
        let done = Transcoder::new(&cache)
            .with_config(config)
            .to_dynamic(&tree())
            .unwrap();
        assert!(!done.is_complete());
        assert!(
            done.skipped()
                .iter()
                .all(|skipped| matches!(skipped.error, TranscodeError::DepthExceeded { limit: 2 }))
        );
        assert!(done.value().contains("name"));
        assert!(done.skipped().iter().any(|skipped| skipped.path == "leaves[0]"));
    }
}
