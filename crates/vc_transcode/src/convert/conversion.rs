use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::convert::Converter;
use crate::info::{TypeInfo, Typed};
use crate::{Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// ErasedConverter

trait ErasedConverter: Send + Sync {
    fn converter_id(&self) -> TypeId;

    fn converter_name(&self) -> &'static str;

    fn original_info(&self) -> &'static TypeInfo;

    fn converted_info(&self) -> &'static TypeInfo;

    fn convert(&self, value: &dyn Transcode) -> Result<Box<dyn Transcode>, TranscodeError>;

    fn convert_back(&self, value: Box<dyn Transcode>) -> Result<Box<dyn Transcode>, TranscodeError>;
}

impl<C: Converter> ErasedConverter for C {
    #[inline]
    fn converter_id(&self) -> TypeId {
        TypeId::of::<C>()
    }

    #[inline]
    fn converter_name(&self) -> &'static str {
        core::any::type_name::<C>()
    }

    #[inline]
    fn original_info(&self) -> &'static TypeInfo {
        C::Original::type_info()
    }

    #[inline]
    fn converted_info(&self) -> &'static TypeInfo {
        C::Converted::type_info()
    }

    fn convert(&self, value: &dyn Transcode) -> Result<Box<dyn Transcode>, TranscodeError> {
        match value.downcast_ref::<C::Original>() {
            Some(original) => Ok(Box::new(Converter::convert(self, original))),
            None => Err(TranscodeError::mismatched(
                C::Original::type_info().type_path(),
                value.dyn_type_info().type_path(),
            )),
        }
    }

    fn convert_back(&self, value: Box<dyn Transcode>) -> Result<Box<dyn Transcode>, TranscodeError> {
        match value.take::<C::Converted>() {
            Ok(converted) => Ok(Box::new(Converter::convert_back(self, converted))),
            Err(value) => Err(TranscodeError::mismatched(
                C::Converted::type_info().type_path(),
                value.dyn_type_info().type_path(),
            )),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversion

/// A type-erased conversion declaration.
///
/// Cheap to clone, the converter itself is shared. The original and
/// converted types are resolved lazily, so a type can carry a conversion
/// of itself inside its own [`TypeInfo`].
///
/// # Examples
///
/// ```
/// use vc_transcode::Transcode;
/// use vc_transcode::convert::{Conversion, FnConverter};
///
/// let conversion = Conversion::from_converter(FnConverter::<u32, String>::new(
///     |n| n.to_string(),
///     |s| s.parse().unwrap_or_default(),
/// ));
/// assert!(conversion.original_info().is::<u32>());
///
/// let text = conversion.convert(&42_u32).unwrap();
/// assert_eq!(text.downcast_ref::<String>().unwrap(), "42");
///
/// let back = conversion.convert_back(text).unwrap();
/// assert_eq!(back.take::<u32>().unwrap(), 42);
/// ```
#[derive(Clone)]
pub struct Conversion(Arc<dyn ErasedConverter>);

impl Conversion {
    /// Declare a conversion through the default instance of `C`.
    #[inline]
    pub fn new<C: Converter + Default>() -> Self {
        Self(Arc::new(C::default()))
    }

    /// Declare a conversion through a converter instance.
    #[inline]
    pub fn from_converter<C: Converter>(converter: C) -> Self {
        Self(Arc::new(converter))
    }

    /// Declare a type-level conversion for `T`.
    ///
    /// Fails to compile if `C` does not convert `T`.
    #[inline]
    pub fn for_type<T, C>() -> Self
    where
        T: Typed,
        C: Converter<Original = T> + Default,
    {
        Self::new::<C>()
    }

    /// The converter's input type.
    #[inline]
    pub fn original_info(&self) -> &'static TypeInfo {
        self.0.original_info()
    }

    /// The converter's output type.
    #[inline]
    pub fn converted_info(&self) -> &'static TypeInfo {
        self.0.converted_info()
    }

    #[inline]
    pub fn converter_name(&self) -> &'static str {
        self.0.converter_name()
    }

    /// Whether both declarations use the same converter type.
    #[inline]
    pub fn same_converter(&self, other: &Self) -> bool {
        self.0.converter_id() == other.0.converter_id()
    }

    /// Apply the forward transform. `value` must be of the original type.
    #[inline]
    pub fn convert(&self, value: &dyn Transcode) -> Result<Box<dyn Transcode>, TranscodeError> {
        self.0.convert(value)
    }

    /// Apply the inverse transform. `value` must be of the converted type.
    #[inline]
    pub fn convert_back(
        &self,
        value: Box<dyn Transcode>,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        self.0.convert_back(value)
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("converter", &self.converter_name())
            .field("original", &self.original_info().type_path())
            .field("converted", &self.converted_info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Conversion;
    use crate::convert::{Converter, FnConverter};
    use crate::{Transcode, TranscodeError};
    use alloc::format;
    use alloc::string::{String, ToString};

    #[derive(Default)]
    struct Hex;

    impl Converter for Hex {
        type Original = u32;
        type Converted = String;

        fn convert(&self, original: &u32) -> String {
            format!("{original:x}")
        }

        fn convert_back(&self, converted: String) -> u32 {
            u32::from_str_radix(&converted, 16).unwrap_or_default()
        }
    }

    #[test]
    fn erased_round_trip() {
        let conversion = Conversion::for_type::<u32, Hex>();
        assert!(conversion.converted_info().is::<String>());

        let converted = conversion.convert(&255_u32).unwrap();
        assert_eq!(converted.downcast_ref::<String>().unwrap(), "ff");
        let back = conversion.convert_back(converted).unwrap();
        assert_eq!(back.take::<u32>().unwrap(), 255);
    }

    #[test]
    fn rejects_foreign_types() {
        let conversion = Conversion::new::<Hex>();
        let err = conversion.convert(&1_i64).unwrap_err();
        assert!(matches!(err, TranscodeError::Shape(_)));

        let err = conversion.convert_back(1_u8.into_boxed_transcode()).unwrap_err();
        assert!(err.to_string().contains("String"));
    }

    #[test]
    fn identity_by_converter_type() {
        let a = Conversion::new::<Hex>();
        let b = Conversion::new::<Hex>();
        let c = Conversion::from_converter(FnConverter::<u32, String>::new(
            |n| n.to_string(),
            |s| s.parse().unwrap_or_default(),
        ));
        assert!(a.same_converter(&b));
        assert!(!a.same_converter(&c));
    }
}
