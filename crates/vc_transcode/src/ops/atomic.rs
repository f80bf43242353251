use crate::Transcode;
use crate::value::AtomicValue;

/// Atomic values: converted to an [`AtomicValue`] as a whole.
pub trait Atomic: Transcode {
    /// Returns the dynamic form of the value.
    fn to_atomic(&self) -> AtomicValue;
}

/// Construction of an atomic type from its dynamic form.
///
/// The value must already have the exact kind of `Self`, coercion happens
/// before this is called. Returns the value back on mismatch.
pub trait FromAtomic: Atomic + Sized {
    fn from_atomic(value: AtomicValue) -> Result<Self, AtomicValue>;
}
