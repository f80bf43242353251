use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::TranscodeError;

// -----------------------------------------------------------------------------
// Skipped

/// A member or element left out because transcoding it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    /// Where the failure happened, such as `address.lines[2]`.
    pub path: String,
    pub error: TranscodeError,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped `{}`: {}", self.path, self.error)
    }
}

// -----------------------------------------------------------------------------
// Transcoded

/// The result of a transcoding that may have skipped some members.
///
/// Per-member failures do not abort the whole operation, they are
/// collected here. An empty [`skipped`](Self::skipped) list means the value
/// is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcoded<T> {
    value: T,
    skipped: Vec<Skipped>,
}

impl<T> Transcoded<T> {
    #[inline]
    pub(crate) const fn new(value: T, skipped: Vec<Skipped>) -> Self {
        Self { value, skipped }
    }

    #[inline]
    pub const fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// No member was skipped.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Discard the diagnostics.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    #[inline]
    pub fn into_parts(self) -> (T, Vec<Skipped>) {
        (self.value, self.skipped)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Transcoded<U> {
        Transcoded {
            value: f(self.value),
            skipped: self.skipped,
        }
    }
}
