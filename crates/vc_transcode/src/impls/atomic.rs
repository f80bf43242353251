use alloc::string::String;
use core::fmt;
use core::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::Transcode;
use crate::info::{AtomicInfo, AtomicKind, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::{Atomic, FromAtomic};
use crate::transcode::impl_transcode_cast_fn;
use crate::value::AtomicValue;

macro_rules! impl_atomic {
    ($($kind:ident => $ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Atomic(AtomicInfo::new::<Self>(AtomicKind::$kind)))
            }
        }

        impl Transcode for $ty {
            impl_transcode_cast_fn!(Atomic);

            #[inline]
            fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }

        impl Atomic for $ty {
            #[inline]
            fn to_atomic(&self) -> AtomicValue {
                AtomicValue::$kind(Clone::clone(self))
            }
        }

        impl FromAtomic for $ty {
            #[inline]
            fn from_atomic(value: AtomicValue) -> Result<Self, AtomicValue> {
                match value {
                    AtomicValue::$kind(value) => Ok(value),
                    other => Err(other),
                }
            }
        }
    )*};
}

impl_atomic! {
    Bool => bool,
    Char => char,
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
    String => String,
    Decimal => Decimal,
    DateTime => NaiveDateTime,
    Date => NaiveDate,
    DateTimeUtc => DateTime<Utc>,
    DateTimeOffset => DateTime<FixedOffset>,
    Duration => Duration,
    TimeDelta => TimeDelta,
    Uuid => Uuid,
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Transcode;
    use crate::info::{AtomicKind, Typed};
    use crate::ops::{FromAtomic, TranscodeRef};
    use crate::value::AtomicValue;
    use alloc::format;
    use alloc::string::String;
    use uuid::Uuid;

    #[test]
    fn atomic_round_trip_through_the_value() {
        let value = String::from("hello");
        let TranscodeRef::Atomic(atomic) = value.transcode_ref() else {
            panic!("`String` should be atomic");
        };
        let dynamic = atomic.to_atomic();
        assert_eq!(dynamic.kind(), AtomicKind::String);
        assert_eq!(String::from_atomic(dynamic).unwrap(), "hello");
        assert_eq!(i32::from_atomic(AtomicValue::I64(1)), Err(AtomicValue::I64(1)));
    }

    #[test]
    fn info_constructs_from_the_matching_kind() {
        let info = Uuid::type_info().as_atomic().unwrap();
        assert_eq!(info.kind(), AtomicKind::Uuid);

        let id = Uuid::from_u128(7);
        let boxed = info.construct(AtomicValue::Uuid(id)).unwrap();
        assert_eq!(boxed.downcast_ref::<Uuid>(), Some(&id));
        assert!(info.construct(AtomicValue::Bool(true)).is_err());
    }

    #[test]
    fn set_replaces_same_type_only() {
        let mut value = 1_u64;
        value.set(9_u64.into_boxed_transcode()).unwrap();
        assert_eq!(value, 9);
        assert!(value.set(9_u32.into_boxed_transcode()).is_err());
        assert_eq!(format!("{:?}", value.as_transcode()), "9");
    }
}
