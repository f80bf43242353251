use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::info::{AtomicKind, TypeInfo, Typed};
use crate::{ShapeError, Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// EnumValue

/// The dynamic form of a fieldless enum value.
///
/// Carries the enum's type, so that values of different enums never compare
/// equal and the reverse transcoder can rebuild the concrete enum.
#[derive(Clone, Copy)]
pub struct EnumValue {
    info: &'static TypeInfo,
    name: &'static str,
    discriminant: i64,
}

impl EnumValue {
    #[inline]
    pub const fn new(info: &'static TypeInfo, name: &'static str, discriminant: i64) -> Self {
        Self {
            info,
            name,
            discriminant,
        }
    }

    /// The enum type.
    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }

    /// Check if this is a variant of `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.info.is::<T>()
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.info.type_id() == other.info.type_id() && self.discriminant == other.discriminant
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.info.ty().ident(), self.name)
    }
}

// -----------------------------------------------------------------------------
// AtomicValue

macro_rules! atomic_value {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// The dynamic form of an atomic value, one variant per atomic kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum AtomicValue {
            $($variant($ty),)*
            Enum(EnumValue),
        }

        impl AtomicValue {
            /// The kind of the value.
            pub const fn kind(&self) -> AtomicKind {
                match self {
                    $(Self::$variant(_) => AtomicKind::$variant,)*
                    Self::Enum(_) => AtomicKind::Enum,
                }
            }

            /// The type the value was produced from.
            pub fn type_info(&self) -> &'static TypeInfo {
                match self {
                    $(Self::$variant(_) => <$ty as Typed>::type_info(),)*
                    Self::Enum(value) => value.type_info(),
                }
            }

            /// Box the value as its native type.
            pub fn into_transcode(self) -> Result<Box<dyn Transcode>, TranscodeError> {
                match self {
                    $(Self::$variant(value) => Ok(Box::new(value)),)*
                    Self::Enum(value) => match value.type_info().as_atomic() {
                        Some(info) => info.construct(Self::Enum(value)),
                        None => Err(ShapeError::UnexpectedValue {
                            ty: value.type_info().type_path(),
                            expected: "enum",
                        }
                        .into()),
                    },
                }
            }
        }

        $(
            impl From<$ty> for AtomicValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

atomic_value! {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    DateTimeOffset(DateTime<FixedOffset>),
    Duration(Duration),
    TimeDelta(TimeDelta),
    Uuid(Uuid),
}

impl From<&str> for AtomicValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<EnumValue> for AtomicValue {
    #[inline]
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl AtomicValue {
    /// Returns the string if this is a [`String`](AtomicValue::String).
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the value and `other` have the same runtime type.
    ///
    /// Enum values compare their enum type, not only the kind.
    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Enum(a), Self::Enum(b)) => a.type_info().type_id() == b.type_info().type_id(),
            _ => self.kind() == other.kind(),
        }
    }
}

/// The display form, used when a value is coerced into a string.
///
/// Date-times use the formats accepted back by [`coerce`](crate::coerce::coerce).
impl fmt::Display for AtomicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Char(value) => fmt::Display::fmt(value, f),
            Self::I8(value) => fmt::Display::fmt(value, f),
            Self::I16(value) => fmt::Display::fmt(value, f),
            Self::I32(value) => fmt::Display::fmt(value, f),
            Self::I64(value) => fmt::Display::fmt(value, f),
            Self::I128(value) => fmt::Display::fmt(value, f),
            Self::Isize(value) => fmt::Display::fmt(value, f),
            Self::U8(value) => fmt::Display::fmt(value, f),
            Self::U16(value) => fmt::Display::fmt(value, f),
            Self::U32(value) => fmt::Display::fmt(value, f),
            Self::U64(value) => fmt::Display::fmt(value, f),
            Self::U128(value) => fmt::Display::fmt(value, f),
            Self::Usize(value) => fmt::Display::fmt(value, f),
            Self::F32(value) => fmt::Display::fmt(value, f),
            Self::F64(value) => fmt::Display::fmt(value, f),
            Self::String(value) => f.write_str(value),
            Self::Decimal(value) => fmt::Display::fmt(value, f),
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            Self::DateTimeUtc(value) => f.write_str(&value.to_rfc3339()),
            Self::DateTimeOffset(value) => f.write_str(&value.to_rfc3339()),
            Self::Duration(value) => write!(f, "{value:?}"),
            Self::TimeDelta(value) => fmt::Display::fmt(value, f),
            Self::Uuid(value) => fmt::Display::fmt(value, f),
            Self::Enum(value) => f.write_str(value.name()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AtomicValue;
    use crate::info::{AtomicKind, Typed};
    use alloc::string::ToString;
    use chrono::NaiveDate;

    #[test]
    fn kind_and_native_type() {
        let value = AtomicValue::from(7_u16);
        assert_eq!(value.kind(), AtomicKind::U16);
        assert!(value.type_info().is::<u16>());

        let boxed = value.into_transcode().unwrap();
        assert_eq!(boxed.downcast_ref::<u16>(), Some(&7));
    }

    #[test]
    fn same_type_is_stricter_than_equality() {
        assert!(AtomicValue::from(1_i32).same_type(&AtomicValue::from(2_i32)));
        assert!(!AtomicValue::from(1_i32).same_type(&AtomicValue::from(1_i64)));
        assert_ne!(AtomicValue::from(1_i32), AtomicValue::from(1_i64));
    }

    #[test]
    fn display_forms() {
        assert_eq!(AtomicValue::from(true).to_string(), "true");
        assert_eq!(AtomicValue::from("abc").to_string(), "abc");
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(AtomicValue::from(date).to_string(), "2024-02-29");
        let at = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(AtomicValue::from(at).to_string(), "2024-02-29T10:30:00");
        assert!(<NaiveDate as Typed>::type_info().is::<NaiveDate>());
    }
}
