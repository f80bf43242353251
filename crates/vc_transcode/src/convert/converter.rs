use core::fmt;
use core::marker::PhantomData;

use crate::Transcode;
use crate::info::Typed;

// -----------------------------------------------------------------------------
// Converter

/// A forward/inverse transform substituted for a type's natural representation.
///
/// Attach it to a type or member with `#[transcode(converter = C)]`, or at
/// runtime with [`MetadataCache::declare_conversion`].
///
/// # Examples
///
/// ```
/// use vc_transcode::convert::Converter;
///
/// #[derive(Default)]
/// struct Celsius;
///
/// impl Converter for Celsius {
///     type Original = f64;
///     type Converted = String;
///
///     fn convert(&self, original: &f64) -> String {
///         format!("{original}C")
///     }
///
///     fn convert_back(&self, converted: String) -> f64 {
///         converted.trim_end_matches('C').parse().unwrap_or_default()
///     }
/// }
///
/// assert_eq!(Celsius.convert(&21.5), "21.5C");
/// assert_eq!(Celsius.convert_back("21.5C".into()), 21.5);
/// ```
///
/// [`MetadataCache::declare_conversion`]: crate::cache::MetadataCache::declare_conversion
pub trait Converter: Send + Sync + 'static {
    /// The declared type.
    type Original: Transcode + Typed;
    /// The type stored in the dynamic representation instead.
    type Converted: Transcode + Typed;

    fn convert(&self, original: &Self::Original) -> Self::Converted;

    fn convert_back(&self, converted: Self::Converted) -> Self::Original;
}

// -----------------------------------------------------------------------------
// FnConverter

/// A converter built from two plain functions.
pub struct FnConverter<O, C> {
    forward: fn(&O) -> C,
    inverse: fn(C) -> O,
}

impl<O, C> FnConverter<O, C> {
    #[inline]
    pub const fn new(forward: fn(&O) -> C, inverse: fn(C) -> O) -> Self {
        Self { forward, inverse }
    }
}

impl<O, C> Converter for FnConverter<O, C>
where
    O: Transcode + Typed,
    C: Transcode + Typed,
{
    type Original = O;
    type Converted = C;

    #[inline]
    fn convert(&self, original: &O) -> C {
        (self.forward)(original)
    }

    #[inline]
    fn convert_back(&self, converted: C) -> O {
        (self.inverse)(converted)
    }
}

impl<O, C> fmt::Debug for FnConverter<O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// CastConverter

/// A converter going through `From` in both directions.
///
/// ```
/// use vc_transcode::Transcode;
/// use vc_transcode::convert::{CastConverter, Converter};
///
/// #[derive(Transcode, Default, Clone, Debug, PartialEq)]
/// struct Rgb {
///     packed: u32,
/// }
///
/// #[derive(Transcode, Default)]
/// struct Channels {
///     r: u8,
///     g: u8,
///     b: u8,
/// }
///
/// impl From<Rgb> for Channels {
///     fn from(rgb: Rgb) -> Self {
///         let [_, r, g, b] = rgb.packed.to_be_bytes();
///         Channels { r, g, b }
///     }
/// }
///
/// impl From<Channels> for Rgb {
///     fn from(c: Channels) -> Self {
///         Rgb { packed: u32::from_be_bytes([0, c.r, c.g, c.b]) }
///     }
/// }
///
/// let converter = CastConverter::<Rgb, Channels>::new();
/// let channels = converter.convert(&Rgb { packed: 0x00ff8000 });
/// assert_eq!((channels.r, channels.g, channels.b), (0xff, 0x80, 0));
/// assert_eq!(converter.convert_back(channels), Rgb { packed: 0x00ff8000 });
/// ```
pub struct CastConverter<O, C>(PhantomData<fn(O) -> C>);

impl<O, C> CastConverter<O, C> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<O, C> Default for CastConverter<O, C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<O, C> Converter for CastConverter<O, C>
where
    O: Transcode + Typed + Clone + From<C>,
    C: Transcode + Typed + From<O>,
{
    type Original = O;
    type Converted = C;

    #[inline]
    fn convert(&self, original: &O) -> C {
        C::from(original.clone())
    }

    #[inline]
    fn convert_back(&self, converted: C) -> O {
        O::from(converted)
    }
}
