use alloc::boxed::Box;
use core::fmt;

use crate::Transcode;
use crate::info::{AbstractInfo, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::TranscodeRef;
use crate::transcode::impl_transcode_cast_fn;
use crate::value::AtomicValue;

// -----------------------------------------------------------------------------
// AnyValue

/// A nullable value of any transcodable type.
///
/// Use it as the declared type of a member whose concrete type is only
/// known at runtime. The forward transcoder represents the held value by
/// its runtime type; the reverse transcoder rebuilds atomic values as their
/// native type, objects as their recorded original type, and sequences as an
/// [`UntypedList`](crate::collections::UntypedList).
///
/// # Examples
///
/// ```
/// use vc_transcode::collections::AnyValue;
///
/// let value = AnyValue::new(5_u16);
/// assert_eq!(value.downcast_ref::<u16>(), Some(&5));
/// assert!(AnyValue::null().is_null());
/// ```
#[derive(Default)]
pub struct AnyValue(Option<Box<dyn Transcode>>);

impl AnyValue {
    #[inline]
    pub const fn null() -> Self {
        Self(None)
    }

    #[inline]
    pub fn new<T: Transcode>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    /// Wrap a boxed value. A boxed `AnyValue` is unwrapped instead of nested.
    pub fn from_boxed(value: Box<dyn Transcode>) -> Self {
        match value.take::<Self>() {
            Ok(any) => any,
            Err(value) => Self(Some(value)),
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub fn get(&self) -> Option<&dyn Transcode> {
        self.0.as_deref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut dyn Transcode> {
        self.0.as_mut().map(|value| &mut **value as &mut dyn Transcode)
    }

    #[inline]
    pub fn downcast_ref<T: Transcode>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    /// Take the held value out, leaving null.
    #[inline]
    pub fn take(&mut self) -> Option<Box<dyn Transcode>> {
        self.0.take()
    }

    #[inline]
    pub fn into_inner(self) -> Option<Box<dyn Transcode>> {
        self.0
    }

    /// The atomic form of the held value, looking through `Option` and
    /// nested `AnyValue`s. Used as the key identity of untyped dictionaries.
    pub(crate) fn atomic_of(value: &dyn Transcode) -> Option<AtomicValue> {
        match value.transcode_ref() {
            TranscodeRef::Atomic(atomic) => Some(atomic.to_atomic()),
            TranscodeRef::Nullable(nullable) => Self::atomic_of(nullable.get()?),
            TranscodeRef::Abstract(any) => Self::atomic_of(any.get()?),
            _ => None,
        }
    }
}

impl From<Box<dyn Transcode>> for AnyValue {
    #[inline]
    fn from(value: Box<dyn Transcode>) -> Self {
        Self::from_boxed(value)
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => f.debug_tuple("AnyValue").field(value).finish(),
            None => f.write_str("AnyValue(null)"),
        }
    }
}

impl Typed for AnyValue {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Abstract(AbstractInfo::new::<Self>()))
    }
}

impl Transcode for AnyValue {
    impl_transcode_cast_fn!(Abstract);

    fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AnyValue;
    use crate::Transcode;
    use crate::value::AtomicValue;

    #[test]
    fn boxed_any_values_do_not_nest() {
        let inner = AnyValue::new(3_i64);
        let outer = AnyValue::from_boxed(inner.into_boxed_transcode());
        assert_eq!(outer.downcast_ref::<i64>(), Some(&3));
    }

    #[test]
    fn atomic_identity_looks_through_wrappers() {
        let value = AnyValue::new(Some(4_u8));
        assert_eq!(AnyValue::atomic_of(&value), Some(AtomicValue::U8(4)));
        assert_eq!(AnyValue::atomic_of(&AnyValue::null()), None);
        assert_eq!(AnyValue::atomic_of(&None::<u8>), None);
    }
}
