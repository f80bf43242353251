//! The forward and reverse transcoders.
//!
//! ## Menu
//!
//! - [`Transcoder`]: converts a concrete graph into a [`DynamicObject`] and back.
//! - [`TranscodeConfig`]: depth limit and diagnostics options.
//! - [`Transcoded`], [`Skipped`]: a result with the members left out on the way.
//! - [`to_dynamic`], [`ToDynamic`]: shorthands using the global cache.
//!
//! ## Failure policy
//!
//! A failure on one member, element or entry does not abort the pass: the
//! member is left out (forward) or keeps its prior value (reverse), and the
//! failure is recorded as [`Skipped`]. Only failures at the root, such as a
//! non-composite root or a representation of a different type, are returned
//! as errors.
//!
//! [`DynamicObject`]: crate::DynamicObject

// -----------------------------------------------------------------------------
// Modules

mod config;
mod forward;
mod outcome;
mod reverse;
mod walk;

// -----------------------------------------------------------------------------
// Exports

pub use config::TranscodeConfig;
pub use outcome::{Skipped, Transcoded};

// -----------------------------------------------------------------------------
// Transcoder

use alloc::boxed::Box;

use crate::cache::MetadataCache;
use crate::value::{DynamicObject, Value};
use crate::{Transcode, TranscodeError};
use walk::Walk;

/// Bidirectional conversion between concrete values and their dynamic
/// representation.
///
/// # Examples
///
/// ```
/// use vc_transcode::{Transcode, Transcoder, Value};
///
/// #[derive(Transcode, Default, Debug, PartialEq)]
/// struct Config {
///     name: String,
///     retries: Option<u8>,
///     hosts: Vec<String>,
/// }
///
/// let transcoder = Transcoder::global();
/// let source = Config {
///     name: "main".into(),
///     retries: None,
///     hosts: vec!["a".into(), "b".into()],
/// };
///
/// let mut object = transcoder.to_dynamic(&source).unwrap().into_inner();
/// assert_eq!(object.get_member("retries"), Some(&Value::Null));
///
/// object.set_member("retries", Value::from("3"));
/// let copy = transcoder.map::<Config>(&object).unwrap().into_inner();
/// assert_eq!(copy.retries, Some(3));
/// assert_eq!(copy.hosts, source.hosts);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Transcoder<'a> {
    cache: &'a MetadataCache,
    config: TranscodeConfig,
}

impl Transcoder<'static> {
    /// A transcoder over [`MetadataCache::global`] with the default config.
    #[inline]
    pub fn global() -> Self {
        Self::new(MetadataCache::global())
    }
}

impl<'a> Transcoder<'a> {
    #[inline]
    pub const fn new(cache: &'a MetadataCache) -> Self {
        Self {
            cache,
            config: TranscodeConfig::new(),
        }
    }

    #[inline]
    pub const fn with_config(mut self, config: TranscodeConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub const fn cache(&self) -> &'a MetadataCache {
        self.cache
    }

    #[inline]
    pub const fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    #[inline]
    fn walk(&self) -> Walk<'a> {
        Walk::new(self.cache, self.config)
    }

    /// Transcode a composite or pair into its dynamic representation.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotComposite`](crate::ShapeError::NotComposite) if the
    /// root is not composite-like, or a [`ConfigError`](crate::ConfigError)
    /// raised while enumerating the root's members.
    pub fn to_dynamic(
        &self,
        value: &dyn Transcode,
    ) -> Result<Transcoded<DynamicObject>, TranscodeError> {
        let mut walk = self.walk();
        let object = walk.root_object(value)?;
        Ok(walk.finish(object))
    }

    /// Transcode a value of any shape.
    pub fn to_value(&self, value: &dyn Transcode) -> Result<Transcoded<Value>, TranscodeError> {
        let mut walk = self.walk();
        let value = walk.value_of(value)?;
        Ok(walk.finish(value))
    }

    /// Write the members present in `object` into `destination`.
    ///
    /// Members absent from the object keep their value. Nested composites
    /// are written in place, any other member is built fully before being
    /// assigned.
    ///
    /// # Errors
    ///
    /// [`ShapeError::MismatchedTypes`](crate::ShapeError::MismatchedTypes)
    /// if the object does not stand for the destination's type.
    pub fn map_into(
        &self,
        object: &DynamicObject,
        destination: &mut dyn Transcode,
    ) -> Result<Transcoded<()>, TranscodeError> {
        let mut walk = self.walk();
        walk.map_root(object, destination)?;
        Ok(walk.finish(()))
    }

    /// Build a `T` from `object`, starting from `T::default()`.
    pub fn map<T: Transcode + Default>(
        &self,
        object: &DynamicObject,
    ) -> Result<Transcoded<T>, TranscodeError> {
        let mut value = T::default();
        let mut walk = self.walk();
        walk.map_root(object, &mut value)?;
        Ok(walk.finish(value))
    }

    /// Build an instance of the object's [`original_type`](DynamicObject::original_type).
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotConstructible`](crate::ShapeError::NotConstructible)
    /// if the type has no default constructor.
    pub fn map_dynamic(
        &self,
        object: &DynamicObject,
    ) -> Result<Transcoded<Box<dyn Transcode>>, TranscodeError> {
        let mut walk = self.walk();
        let value = walk.build_root(object)?;
        Ok(walk.finish(value))
    }
}

// -----------------------------------------------------------------------------
// Shorthands

/// Transcode `value` with the global cache. Skipped members are logged.
///
/// See [`Transcoder::to_dynamic`].
#[inline]
pub fn to_dynamic<T: Transcode>(value: &T) -> Result<DynamicObject, TranscodeError> {
    Transcoder::global().to_dynamic(value).map(Transcoded::into_inner)
}

/// Method form of [`to_dynamic`].
///
/// ```
/// use vc_transcode::Transcode;
/// use vc_transcode::transcoder::ToDynamic;
///
/// #[derive(Transcode, Default)]
/// struct Unit {
///     id: u32,
/// }
///
/// let object = Unit { id: 4 }.to_dynamic().unwrap();
/// assert_eq!(object.len(), 1);
/// ```
pub trait ToDynamic {
    fn to_dynamic(&self) -> Result<DynamicObject, TranscodeError>;
}

impl<T: Transcode> ToDynamic for T {
    #[inline]
    fn to_dynamic(&self) -> Result<DynamicObject, TranscodeError> {
        to_dynamic(self)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{TranscodeConfig, Transcoder};
    use crate::cache::MetadataCache;
    use crate::collections::{UntypedList, UntypedMap};
    use crate::convert::Converter;
    use crate::info::Typed;
    use crate::value::{AtomicValue, DynamicObject, Value};
    use crate::{Transcode, TranscodeError};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Fahrenheit;

    impl Converter for Fahrenheit {
        type Original = f64;
        type Converted = String;

        fn convert(&self, celsius: &f64) -> String {
            format!("{}F", celsius * 9.0 / 5.0 + 32.0)
        }

        fn convert_back(&self, text: String) -> f64 {
            let fahrenheit: f64 = text.trim_end_matches('F').parse().unwrap_or_default();
            (fahrenheit - 32.0) * 5.0 / 9.0
        }
    }

    #[derive(Transcode, Default, Debug, PartialEq, Clone)]
    struct Reading {
        #[transcode(converter = Fahrenheit)]
        celsius: f64,
        #[transcode(converter = Fahrenheit)]
        peak: Option<f64>,
        station: String,
    }

    #[derive(Transcode, Default, Debug, PartialEq, Clone)]
    #[transcode(converter = ReadingAsPair)]
    struct Packed {
        a: i32,
        b: i32,
    }

    #[derive(Default)]
    struct ReadingAsPair;

    impl Converter for ReadingAsPair {
        type Original = Packed;
        type Converted = (i32, i32);

        fn convert(&self, packed: &Packed) -> (i32, i32) {
            (packed.a, packed.b)
        }

        fn convert_back(&self, (a, b): (i32, i32)) -> Packed {
            Packed { a, b }
        }
    }

    #[derive(Transcode, Default)]
    struct Holder {
        packed: Packed,
        list: Vec<Packed>,
        by_name: HashMap<String, i32>,
        free: UntypedMap,
    }

    #[derive(Transcode, Default, Debug, PartialEq)]
    #[transcode(property(name = "area", ty = u32, get = Self::area, include))]
    #[transcode(property(name = "perimeter", ty = u32, get = Self::perimeter))]
    struct Plot {
        width: u32,
        depth: u32,
        #[transcode(readonly, include)]
        registry: String,
        #[transcode(readonly)]
        owner: String,
    }

    impl Plot {
        fn area(&self) -> u32 {
            self.width * self.depth
        }

        fn perimeter(&self) -> u32 {
            2 * (self.width + self.depth)
        }
    }

    fn quiet(cache: &MetadataCache) -> Transcoder<'_> {
        Transcoder::new(cache).with_config(TranscodeConfig::new().with_log_skipped(false))
    }

    #[test]
    fn member_converters_are_inverted() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let source = Reading {
            celsius: 100.0,
            peak: Some(0.0),
            station: String::from("north"),
        };

        let object = transcoder.to_dynamic(&source).unwrap().into_inner();
        assert_eq!(object.get_member("celsius"), Some(&Value::from("212F")));
        assert_eq!(object.get_member("peak"), Some(&Value::from("32F")));

        let copy = transcoder.map::<Reading>(&object).unwrap().into_inner();
        assert_eq!(copy, source);

        let empty = Reading {
            peak: None,
            ..source
        };
        let object = transcoder.to_dynamic(&empty).unwrap().into_inner();
        assert_eq!(object.get_member("peak"), Some(&Value::Null));
        assert_eq!(transcoder.map::<Reading>(&object).unwrap().into_inner(), empty);
    }

    #[test]
    fn type_converters_record_provenance() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let source = Packed { a: 1, b: 2 };

        let object = transcoder.to_dynamic(&source).unwrap().into_inner();
        assert!(object.is_converted());
        assert!(object.represented_type().is::<(i32, i32)>());
        assert!(object.original_type().is::<Packed>());
        assert_eq!(object.get_member("Key"), Some(&Value::from(1)));

        let mut destination = Packed::default();
        transcoder.map_into(&object, &mut destination).unwrap();
        assert_eq!(destination, source);

        let built = transcoder.map_dynamic(&object).unwrap().into_inner();
        assert_eq!(built.take::<Packed>().unwrap(), source);
    }

    #[test]
    fn converted_elements_and_dictionaries() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let mut free = UntypedMap::default();
        free.insert(
            crate::collections::AnyValue::new(String::from("k")),
            crate::collections::AnyValue::new(5_i64),
        );
        let source = Holder {
            packed: Packed { a: 3, b: 4 },
            list: vec![Packed { a: 5, b: 6 }],
            by_name: HashMap::from([(String::from("x"), 1)]),
            free,
        };

        let object = transcoder.to_dynamic(&source).unwrap().into_inner();
        let list = object.get_member("list").unwrap().as_sequence().unwrap();
        assert!(list[0].as_object().unwrap().is_converted());

        let done = transcoder.map::<Holder>(&object).unwrap();
        assert!(done.is_complete(), "{:?}", done.skipped());
        let copy = done.into_inner();
        assert_eq!(copy.packed, source.packed);
        assert_eq!(copy.list, source.list);
        assert_eq!(copy.by_name, source.by_name);
        let value = copy.free.get(&String::from("k")).unwrap();
        assert_eq!(value.downcast_ref::<i64>(), Some(&5));
    }

    #[test]
    fn untyped_lists_are_sequences() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let mut object = DynamicObject::new(UntypedList::type_info());
        object.insert("ignored", Value::from(1));
        // an untyped list is not composite
        assert!(matches!(
            transcoder.map_dynamic(&object),
            Err(TranscodeError::Shape(_))
        ));

        let value = transcoder
            .to_value(&UntypedList::from_iter([
                crate::collections::AnyValue::new(1_u8),
                crate::collections::AnyValue::null(),
            ]))
            .unwrap()
            .into_inner();
        assert_eq!(
            value,
            Value::Sequence(vec![Value::Atomic(AtomicValue::U8(1)), Value::Null])
        );
    }

    #[test]
    fn force_included_read_only_members() {
        let cache = MetadataCache::new();
        let transcoder = quiet(&cache);
        let source = Plot {
            width: 3,
            depth: 4,
            registry: String::from("R-1"),
            owner: String::from("ann"),
        };

        let mut object = transcoder.to_dynamic(&source).unwrap().into_inner();
        assert_eq!(
            object.member_names().collect::<Vec<_>>(),
            ["width", "depth", "registry", "area"]
        );
        assert_eq!(object.get_member("registry"), Some(&Value::from("R-1")));
        assert_eq!(object.get_member("area"), Some(&Value::from(12_u32)));
        assert!(!object.contains("owner"));
        assert!(!object.contains("perimeter"));

        // read-only members are read but never written back
        object.insert("width", Value::from(5_u32));
        object.insert("registry", Value::from("R-2"));
        object.insert("area", Value::from(99_u32));
        let mut destination = Plot {
            registry: String::from("R-1"),
            ..Plot::default()
        };
        let done = transcoder.map_into(&object, &mut destination).unwrap();
        assert!(done.is_complete(), "{:?}", done.skipped());
        assert_eq!(destination.width, 5);
        assert_eq!(destination.depth, 4);
        assert_eq!(destination.registry, "R-1");
        assert_eq!(destination.area(), 20);
    }
}
