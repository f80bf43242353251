use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by [`#[derive(Transcode)]`](crate::derive::Transcode) and by the
/// built-in implementations in [`impls`](crate::impls).
///
/// # Examples
///
/// ```
/// use vc_transcode::info::{Typed, TypeClass, classify};
///
/// let info = <Vec<i32> as Typed>::type_info();
/// assert_eq!(classify(info), TypeClass::Collection);
/// ```
///
/// # Manually Impl
///
/// Use [`NonGenericTypeInfoCell`](crate::info::NonGenericTypeInfoCell) or
/// [`GenericTypeInfoCell`](crate::info::GenericTypeInfoCell), so that the
/// information is built once and shared for the process lifetime.
pub trait Typed: 'static {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`].
///
/// Automatically implemented for every type that implements [`Typed`],
/// it is a supertrait of [`Transcode`](crate::Transcode).
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn dyn_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn dyn_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
