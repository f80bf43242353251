//! Conversion declarations.
//!
//! A [`Converter`] substitutes an alternate representation for a type or
//! member. [`Conversion`] is its type-erased, shareable form, stored in
//! [`TypeInfo`](crate::info::TypeInfo) by `#[transcode(converter = C)]` or
//! registered at runtime through the [`MetadataCache`](crate::cache::MetadataCache).
//!
//! With the `auto_register` feature, [`register_conversion!`](crate::register_conversion)
//! declares a conversion for a foreign type from anywhere in the program. The
//! declarations are collected when [`MetadataCache::global`](crate::cache::MetadataCache::global)
//! is first accessed.

// -----------------------------------------------------------------------------
// Modules

mod conversion;
mod converter;

// -----------------------------------------------------------------------------
// Exports

pub use conversion::Conversion;
pub use converter::{CastConverter, Converter, FnConverter};

// -----------------------------------------------------------------------------
// Registration

/// A conversion declared through [`register_conversion!`](crate::register_conversion).
#[doc(hidden)]
pub struct ConversionRegistration(pub fn() -> Conversion);

#[cfg(feature = "auto_register")]
inventory::collect!(ConversionRegistration);

/// Iterate the conversions declared through [`register_conversion!`](crate::register_conversion).
#[cfg(feature = "auto_register")]
pub(crate) fn registered() -> impl Iterator<Item = Conversion> {
    inventory::iter::<ConversionRegistration>
        .into_iter()
        .map(|registration| (registration.0)())
}

/// Declare a conversion for the process-wide metadata cache.
///
/// The converter must implement [`Converter`] and `Default`. Useful for
/// types the current crate does not own, which cannot carry a
/// `#[transcode(converter = ..)]` attribute.
///
/// Does nothing without the `auto_register` feature.
///
/// ```ignore
/// vc_transcode::register_conversion!(my_crate::UrlAsString);
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_conversion {
    ($converter:ty) => {
        const _: () = {
            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::convert::ConversionRegistration(
                    $crate::convert::Conversion::new::<$converter>
                )
            }
        };
    };
}

/// Declare a conversion for the process-wide metadata cache.
///
/// The `auto_register` feature is disabled, this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! register_conversion {
    ($converter:ty) => {};
}
