use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::DynamicTyped;
use crate::ops::{TranscodeMut, TranscodeRef};

// -----------------------------------------------------------------------------
// Transcode

/// A value the transcoders can walk.
///
/// Implemented by `#[derive(Transcode)]` for structs and fieldless enums,
/// and by the built-in implementations for atomic types, `Option<T>`,
/// the standard containers and `(K, V)` pairs.
///
/// The shape of a value is exposed through [`transcode_ref`] and
/// [`transcode_mut`], the static description of the type through
/// [`DynamicTyped::dyn_type_info`].
///
/// [`transcode_ref`]: Transcode::transcode_ref
/// [`transcode_mut`]: Transcode::transcode_mut
pub trait Transcode: DynamicTyped + Send + Sync + Any {
    /// Casts this type to a transcode trait object.
    #[inline(always)]
    fn as_transcode(&self) -> &dyn Transcode
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable transcode trait object.
    #[inline(always)]
    fn as_transcode_mut(&mut self) -> &mut dyn Transcode
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed transcode trait object.
    #[inline(always)]
    fn into_transcode(self: Box<Self>) -> Box<dyn Transcode>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value into a transcode trait object.
    #[inline(always)]
    fn into_boxed_transcode(self) -> Box<dyn Transcode>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replace `self` with `value`.
    ///
    /// Returns the value back if its type is not `Self`.
    fn set(&mut self, value: Box<dyn Transcode>) -> Result<(), Box<dyn Transcode>>;

    /// Returns an immutable enumeration of the value's shape.
    fn transcode_ref(&self) -> TranscodeRef<'_>;

    /// Returns a mutable enumeration of the value's shape.
    fn transcode_mut(&mut self) -> TranscodeMut<'_>;

    /// Debug formatter for the trait object, defaults to the type path.
    fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dyn_type_info().type_path())
    }
}

impl dyn Transcode {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_transcode::Transcode;
    /// let x: Box<dyn Transcode> = 10_i32.into_boxed_transcode();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Transcode>) -> Result<Box<T>, Box<dyn Transcode>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_transcode::Transcode;
    /// let x: Box<dyn Transcode> = String::from("abc").into_boxed_transcode();
    ///
    /// assert!(x.take::<u32>().is_err_and(|x| x.is::<String>()));
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Transcode>) -> Result<T, Box<dyn Transcode>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Transcode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.transcode_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement `set`, `transcode_ref` and `transcode_mut` for a given shape.
macro_rules! impl_transcode_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Transcode>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Transcode>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn transcode_ref(&self) -> $crate::ops::TranscodeRef<'_> {
            $crate::ops::TranscodeRef::$kind(self)
        }

        #[inline]
        fn transcode_mut(&mut self) -> $crate::ops::TranscodeMut<'_> {
            $crate::ops::TranscodeMut::$kind(self)
        }
    };
}

pub(crate) use impl_transcode_cast_fn;
