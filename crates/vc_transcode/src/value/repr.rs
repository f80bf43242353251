use alloc::string::String;
use alloc::vec::Vec;

use crate::collections::UntypedList;
use crate::info::{TypeInfo, Typed};
use crate::value::{AtomicValue, DynamicObject};

/// A value of the dynamic representation.
///
/// Sequence elements are themselves values, in the order of the source
/// collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Atomic(AtomicValue),
    Object(DynamicObject),
    Sequence(Vec<Value>),
}

impl Value {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_atomic(&self) -> Option<&AtomicValue> {
        match self {
            Self::Atomic(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&DynamicObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut DynamicObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The runtime type of the value, `None` for null.
    ///
    /// Objects report their represented type, sequences report
    /// [`UntypedList`].
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Null => None,
            Self::Atomic(value) => Some(value.type_info()),
            Self::Object(object) => Some(object.represented_type()),
            Self::Sequence(_) => Some(UntypedList::type_info()),
        }
    }

    /// Whether `self` may replace `current` in a [`DynamicObject`].
    ///
    /// Null is assignable to anything and anything is assignable over a
    /// stored null. Otherwise the runtime types must match.
    pub fn is_assignable_to(&self, current: &Value) -> bool {
        match (current, self) {
            (Self::Null, _) | (_, Self::Null) => true,
            (Self::Atomic(current), Self::Atomic(value)) => value.same_type(current),
            (Self::Object(current), Self::Object(value)) => {
                value.represented_type().type_id() == current.represented_type().type_id()
            }
            (Self::Sequence(_), Self::Sequence(_)) => true,
            _ => false,
        }
    }
}

impl From<AtomicValue> for Value {
    #[inline]
    fn from(value: AtomicValue) -> Self {
        Self::Atomic(value)
    }
}

impl From<DynamicObject> for Value {
    #[inline]
    fn from(object: DynamicObject) -> Self {
        Self::Object(object)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! impl_from_atomic {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Atomic(AtomicValue::from(value))
                }
            }
        )*
    };
}

impl_from_atomic!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &str,
    rust_decimal::Decimal,
    chrono::NaiveDateTime,
    chrono::NaiveDate,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    core::time::Duration,
    chrono::TimeDelta,
    uuid::Uuid,
    crate::value::EnumValue,
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Value;
    use alloc::vec;

    #[test]
    fn assignability() {
        let int = Value::from(1_i32);
        assert!(Value::from(5_i32).is_assignable_to(&int));
        assert!(!Value::from("five").is_assignable_to(&int));
        assert!(Value::Null.is_assignable_to(&int));
        assert!(Value::from("five").is_assignable_to(&Value::Null));
        assert!(Value::from(vec![Value::from(1_u8)]).is_assignable_to(&Value::Sequence(vec![])));
        assert!(!Value::Sequence(vec![]).is_assignable_to(&int));
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3_i32)), Value::from(3_i32));
    }
}
