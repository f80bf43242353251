//! Safe value coercion.
//!
//! [`coerce`] converts a dynamic value into the atomic type a member
//! declares. It never fails loudly: a value that cannot be converted becomes
//! null, and the reason is logged at `warn` and kept in [`Coerced::Null`].

mod convert;

use crate::CoerceError;
use crate::info::TypeInfo;
use crate::value::{AtomicValue, Value};

// -----------------------------------------------------------------------------
// Coerced

/// Result of [`coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// The value was converted into the target type.
    Converted(Value),
    /// The value is returned as is: it already has the target type, or the
    /// target has no generic conversion.
    Unchanged(Value),
    /// The value coerced to null. Carries the reason for soft failures,
    /// `None` for empty strings.
    Null(Option<CoerceError>),
}

impl Coerced {
    /// The resulting value, null for [`Coerced::Null`].
    #[inline]
    pub fn into_value(self) -> Value {
        match self {
            Self::Converted(value) | Self::Unchanged(value) => value,
            Self::Null(_) => Value::Null,
        }
    }

    /// The reason of a soft failure.
    #[inline]
    pub fn error(&self) -> Option<&CoerceError> {
        match self {
            Self::Null(error) => error.as_ref(),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// coerce

fn is_same_type(value: &AtomicValue, target: &TypeInfo) -> bool {
    match (value, target.as_atomic()) {
        (AtomicValue::Enum(value), Some(_)) => value.type_info().type_id() == target.type_id(),
        (value, Some(info)) => !info.is_enum() && value.kind() == info.kind(),
        (_, None) => false,
    }
}

fn soft_failure(error: CoerceError) -> Coerced {
    log::warn!("value coercion failed: {error}");
    Coerced::Null(Some(error))
}

/// Coerce `value` into `target`.
///
/// Rules, in order:
///
/// 1. A null value, or a value already of the target type, is unchanged.
/// 2. `Option<T>` targets resolve to `T`.
/// 3. Targets without a generic conversion (non-atomic types, GUIDs,
///    durations, zoned date-times) leave the value unchanged.
/// 4. Enum targets resolve a variant by name, or by discriminant.
/// 5. Otherwise the value goes through the generic conversion: numbers with
///    range checks, strings through parsing, anything into a string through
///    its display form. An empty string coerces to null.
///
/// Objects and sequences cannot be converted into an atomic type. Any failure
/// yields [`Coerced::Null`].
///
/// # Examples
///
/// ```
/// use vc_transcode::Value;
/// use vc_transcode::coerce::{Coerced, coerce};
/// use vc_transcode::info::Typed;
///
/// let coerced = coerce(Value::from("42"), <Option<i64>>::type_info());
/// assert_eq!(coerced, Coerced::Converted(Value::from(42_i64)));
///
/// let coerced = coerce(Value::from("not-an-int"), i32::type_info());
/// assert!(coerced.error().is_some());
/// assert_eq!(coerced.into_value(), Value::Null);
/// ```
pub fn coerce(value: Value, target: &'static TypeInfo) -> Coerced {
    let resolved = match target {
        TypeInfo::Nullable(info) => info.inner(),
        _ => target,
    };
    let atomic = match value {
        Value::Atomic(atomic) => atomic,
        Value::Null => return Coerced::Unchanged(Value::Null),
        other => {
            return match resolved.as_atomic() {
                Some(info) if info.kind().is_convertible() => soft_failure(CoerceError::NotAtomic {
                    ty: resolved.type_path(),
                }),
                _ => Coerced::Unchanged(other),
            };
        }
    };

    if is_same_type(&atomic, resolved) {
        return Coerced::Unchanged(Value::Atomic(atomic));
    }
    match resolved.as_atomic() {
        Some(info) if info.kind().is_convertible() => {}
        _ => return Coerced::Unchanged(Value::Atomic(atomic)),
    }
    if atomic.as_str().is_some_and(str::is_empty) {
        return Coerced::Null(None);
    }

    match convert::convert_atomic(atomic, resolved) {
        Ok(converted) => Coerced::Converted(Value::Atomic(converted)),
        Err(error) => soft_failure(error),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Coerced, coerce};
    use crate::info::Typed;
    use crate::value::{AtomicValue, DynamicObject, Value};
    use crate::{CoerceError, collections::UntypedList};
    use alloc::string::String;
    use alloc::vec::Vec;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn converted(value: Value, target: &'static crate::info::TypeInfo) -> Value {
        match coerce(value, target) {
            Coerced::Converted(value) => value,
            other => panic!("expected a conversion, got {other:?}"),
        }
    }

    #[test]
    fn same_type_is_unchanged() {
        assert_eq!(
            coerce(Value::from(5_i32), i32::type_info()),
            Coerced::Unchanged(Value::from(5_i32))
        );
        assert_eq!(
            coerce(Value::from(5_i32), <Option<i32>>::type_info()),
            Coerced::Unchanged(Value::from(5_i32))
        );
        assert_eq!(
            coerce(Value::Null, i32::type_info()),
            Coerced::Unchanged(Value::Null)
        );
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(converted(Value::from(7_u8), i64::type_info()), Value::from(7_i64));
        assert_eq!(converted(Value::from(2.5_f64), i32::type_info()), Value::from(2_i32));
        assert_eq!(converted(Value::from(3.5_f64), i32::type_info()), Value::from(4_i32));
        assert_eq!(converted(Value::from(1_i32), bool::type_info()), Value::from(true));
        assert_eq!(
            converted(Value::from(3_i32), Decimal::type_info()),
            Value::from(Decimal::from(3))
        );

        let overflow = coerce(Value::from(300_i32), u8::type_info());
        assert!(matches!(overflow.error(), Some(CoerceError::Overflow { .. })));
        assert_eq!(overflow.into_value(), Value::Null);
    }

    #[test]
    fn string_conversions() {
        assert_eq!(converted(Value::from(" 12 "), u16::type_info()), Value::from(12_u16));
        assert_eq!(converted(Value::from("TRUE"), bool::type_info()), Value::from(true));
        assert_eq!(converted(Value::from(12_u16), String::type_info()), Value::from("12"));
        assert_eq!(
            converted(Value::from("2024-03-01"), NaiveDate::type_info()),
            Value::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            converted(Value::from("1.25"), Decimal::type_info()),
            Value::from(Decimal::new(125, 2))
        );

        assert_eq!(coerce(Value::from(""), i32::type_info()), Coerced::Null(None));
        assert!(matches!(
            coerce(Value::from("abc"), i32::type_info()).error(),
            Some(CoerceError::Parse { .. })
        ));
    }

    #[test]
    fn non_convertible_targets_pass_through() {
        let text = Value::from("6f1e0a8e-4c3b-4d8e-9a51-0d0c2b7f9e11");
        assert_eq!(
            coerce(text.clone(), Uuid::type_info()),
            Coerced::Unchanged(text)
        );

        let sequence = Value::Sequence(Vec::new());
        assert_eq!(
            coerce(sequence.clone(), <Vec<i32>>::type_info()),
            Coerced::Unchanged(sequence)
        );
    }

    #[derive(crate::Transcode, Debug, Clone, Copy, PartialEq)]
    enum Mode {
        Off,
        On = 4,
    }

    #[test]
    fn enum_conversions() {
        let on = Value::from(crate::ops::Atomic::to_atomic(&Mode::On));
        let off = Value::from(crate::ops::Atomic::to_atomic(&Mode::Off));
        assert_eq!(converted(Value::from("On"), Mode::type_info()), on);
        assert_eq!(converted(Value::from(" 4 "), Mode::type_info()), on);
        assert_eq!(converted(Value::from(4_u8), Mode::type_info()), on);
        assert_eq!(converted(Value::from(0_i64), <Option<Mode>>::type_info()), off);
        assert!(matches!(
            coerce(Value::from("Standby"), Mode::type_info()).error(),
            Some(CoerceError::UnknownVariant { .. })
        ));
        assert_eq!(converted(on, String::type_info()), Value::from("On"));
    }

    #[test]
    fn structured_values_do_not_become_atomic() {
        let object = Value::Object(DynamicObject::new(UntypedList::type_info()));
        let coerced = coerce(object, i32::type_info());
        assert!(matches!(coerced.error(), Some(CoerceError::NotAtomic { .. })));
        assert!(matches!(
            coerce(Value::from(AtomicValue::from('x')), char::type_info()),
            Coerced::Unchanged(_)
        ));
    }
}
