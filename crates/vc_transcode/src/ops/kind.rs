use crate::Transcode;
use crate::collections::AnyValue;
use crate::ops::{Atomic, Collection, Composite, Dictionary, Nullable, Pair};

/// An immutable enumeration of the shape of a value.
///
/// Obtained through [`Transcode::transcode_ref`].
pub enum TranscodeRef<'a> {
    Atomic(&'a dyn Atomic),
    Nullable(&'a dyn Nullable),
    Collection(&'a dyn Collection),
    Dictionary(&'a dyn Dictionary),
    Pair(&'a dyn Pair),
    Composite(&'a dyn Composite),
    Abstract(&'a AnyValue),
    Opaque(&'a dyn Transcode),
}

/// A mutable enumeration of the shape of a value.
///
/// Obtained through [`Transcode::transcode_mut`].
pub enum TranscodeMut<'a> {
    Atomic(&'a mut dyn Atomic),
    Nullable(&'a mut dyn Nullable),
    Collection(&'a mut dyn Collection),
    Dictionary(&'a mut dyn Dictionary),
    Pair(&'a mut dyn Pair),
    Composite(&'a mut dyn Composite),
    Abstract(&'a mut AnyValue),
    Opaque(&'a mut dyn Transcode),
}

impl TranscodeRef<'_> {
    /// Name of the shape, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Atomic(_) => "atomic",
            Self::Nullable(_) => "nullable",
            Self::Collection(_) => "collection",
            Self::Dictionary(_) => "dictionary",
            Self::Pair(_) => "pair",
            Self::Composite(_) => "composite",
            Self::Abstract(_) => "abstract",
            Self::Opaque(_) => "opaque",
        }
    }
}
