use alloc::boxed::Box;
use core::fmt;

use crate::convert::Conversion;
use crate::info::{Type, Typed};
use crate::ops::FromAtomic;
use crate::value::AtomicValue;
use crate::{ShapeError, Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// AtomicKind

/// The runtime kind of an atomic value.
///
/// One kind per entry of the atomic catalogue. All fieldless enums share
/// the [`Enum`](AtomicKind::Enum) kind, [`EnumValue`](crate::value::EnumValue)
/// carries the concrete enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
    Decimal,
    DateTime,
    Date,
    DateTimeUtc,
    DateTimeOffset,
    Duration,
    TimeDelta,
    Uuid,
    Enum,
}

impl AtomicKind {
    /// Returns the name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Decimal => "decimal",
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::DateTimeUtc => "utc date-time",
            Self::DateTimeOffset => "date-time with offset",
            Self::Duration => "duration",
            Self::TimeDelta => "time delta",
            Self::Uuid => "uuid",
            Self::Enum => "enum",
        }
    }

    /// Integer kinds, signed or not.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Decimal)
    }

    /// Whether [`coerce`](crate::coerce::coerce) may convert values into this kind.
    ///
    /// GUIDs, durations and zoned date-times have no generic conversion,
    /// a value targeting them is passed through unchanged.
    pub const fn is_convertible(self) -> bool {
        !matches!(
            self,
            Self::Uuid | Self::Duration | Self::TimeDelta | Self::DateTimeUtc | Self::DateTimeOffset
        )
    }
}

impl fmt::Display for AtomicKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// EnumVariant

/// A variant of a fieldless enum: its name and discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumVariant {
    name: &'static str,
    discriminant: i64,
}

impl EnumVariant {
    #[inline]
    pub const fn new(name: &'static str, discriminant: i64) -> Self {
        Self { name, discriminant }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }
}

// -----------------------------------------------------------------------------
// AtomicInfo

/// Type information for atomic types.
///
/// Besides the kind, it stores the constructor used by the reverse
/// transcoder to turn an [`AtomicValue`] back into the concrete type.
#[derive(Clone)]
pub struct AtomicInfo {
    ty: Type,
    kind: AtomicKind,
    from_atomic: fn(AtomicValue) -> Result<Box<dyn Transcode>, AtomicValue>,
    variants: Box<[EnumVariant]>,
    conversion: Option<Conversion>,
}

fn from_atomic_erased<T: FromAtomic>(value: AtomicValue) -> Result<Box<dyn Transcode>, AtomicValue> {
    T::from_atomic(value).map(|value| Box::new(value) as Box<dyn Transcode>)
}

impl AtomicInfo {
    /// Create info for a non-enum atomic type.
    pub fn new<T: FromAtomic + Typed>(kind: AtomicKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            from_atomic: from_atomic_erased::<T>,
            variants: Box::new([]),
            conversion: None,
        }
    }

    /// Create info for a fieldless enum.
    pub fn new_enum<T: FromAtomic + Typed>(variants: &[EnumVariant]) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind: AtomicKind::Enum,
            from_atomic: from_atomic_erased::<T>,
            variants: variants.into(),
            conversion: None,
        }
    }

    /// Attach a type-level conversion declaration.
    #[inline]
    pub fn with_conversion(mut self, conversion: Conversion) -> Self {
        self.conversion = Some(conversion);
        self
    }

    /// Replace the [`Type`], used to pin a stable path or definition.
    #[inline]
    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = ty;
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> AtomicKind {
        self.kind
    }

    #[inline]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, AtomicKind::Enum)
    }

    #[inline]
    pub fn conversion(&self) -> Option<&Conversion> {
        self.conversion.as_ref()
    }

    /// The variants of an enum type, empty for other atomics.
    #[inline]
    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    /// Find a variant by its exact name.
    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.name == name)
    }

    /// Find a variant by its discriminant.
    pub fn variant_by_discriminant(&self, discriminant: i64) -> Option<&EnumVariant> {
        self.variants
            .iter()
            .find(|variant| variant.discriminant == discriminant)
    }

    /// Build the concrete type from an atomic value of exactly this kind.
    ///
    /// No coercion happens here, see [`coerce`](crate::coerce::coerce).
    pub fn construct(&self, value: AtomicValue) -> Result<Box<dyn Transcode>, TranscodeError> {
        (self.from_atomic)(value).map_err(|value| {
            TranscodeError::Shape(ShapeError::MismatchedTypes {
                expected: self.ty.path(),
                found: value.kind().name(),
            })
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{AtomicKind, EnumVariant};
    use crate::Transcode;
    use crate::info::Typed;
    use crate::ops::{Atomic, FromAtomic};
    use crate::value::AtomicValue;
    use alloc::format;

    #[derive(Transcode, Debug, Clone, Copy, PartialEq)]
    enum Level {
        Low = 1,
        #[transcode(rename = "mid")]
        Medium = 5,
        High = 10,
    }

    #[derive(Transcode, Debug, PartialEq)]
    enum Other {
        Low,
    }

    #[test]
    fn derived_enum_info() {
        let info = Level::type_info().as_atomic().unwrap();
        assert_eq!(info.kind(), AtomicKind::Enum);
        assert!(info.is_enum());
        assert_eq!(
            info.variants(),
            [
                EnumVariant::new("Low", 1),
                EnumVariant::new("mid", 5),
                EnumVariant::new("High", 10),
            ]
        );
        assert_eq!(info.variant_by_discriminant(10).map(EnumVariant::name), Some("High"));
        assert!(info.variant("Medium").is_none());
    }

    #[test]
    fn derived_enum_values() {
        let AtomicValue::Enum(value) = Level::Medium.to_atomic() else {
            panic!("expected an enum value");
        };
        assert_eq!((value.name(), value.discriminant()), ("mid", 5));
        assert!(value.is::<Level>());

        assert_eq!(Level::from_atomic(AtomicValue::Enum(value)), Ok(Level::Medium));
        // same variant name, different enum
        assert!(Level::from_atomic(Other::Low.to_atomic()).is_err());
        assert!(Level::from_atomic(AtomicValue::I32(5)).is_err());

        let built = Level::type_info()
            .as_atomic()
            .unwrap()
            .construct(Level::High.to_atomic())
            .unwrap();
        assert_eq!(built.downcast_ref::<Level>(), Some(&Level::High));
        assert_eq!(format!("{:?}", Level::Medium.as_transcode()), "mid");
    }
}
