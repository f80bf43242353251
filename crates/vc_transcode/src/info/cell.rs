//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed).
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`], for non-generic types.
//! - [`GenericTypeInfoCell`]: a [`TypeIdMap`] behind a [`RwLock`], for generic
//!   types whose `static CELL` is shared by every instantiation.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::info::TypeInfo;
use crate::type_map::TypeIdMap;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for static storage of non-generic type information.
///
/// # Examples
///
/// ```
/// use vc_transcode::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
///
/// struct Token;
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Token::type_info().ty().is::<Token>());
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for static storage of type information with generics.
///
/// A `static` inside a generic function is shared by all instantiations,
/// so entries are keyed by [`TypeId`]. Entries are leaked, readers never
/// observe a partially built value. When two threads race on the same
/// type, the first insertion wins.
///
/// # Examples
///
/// ```
/// use vc_transcode::info::{GenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
///
/// struct Wrapper<T>(T);
///
/// impl<T: 'static> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(<Wrapper<u8>>::type_info().ty().is::<Wrapper<u8>>());
/// assert!(<Wrapper<i8>>::type_info().ty().is::<Wrapper<i8>>());
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, generating it with `f` if absent.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for GenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}
