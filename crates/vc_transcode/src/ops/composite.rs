use alloc::boxed::Box;
use core::ops::Deref;

use crate::Transcode;

// -----------------------------------------------------------------------------
// MemberValue

/// The value read from a member.
///
/// Fields are borrowed, properties return a fresh value from their getter.
pub enum MemberValue<'a> {
    Borrowed(&'a dyn Transcode),
    Owned(Box<dyn Transcode>),
}

impl Deref for MemberValue<'_> {
    type Target = dyn Transcode;

    #[inline]
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

// -----------------------------------------------------------------------------
// Composite

/// Index-based member access.
///
/// Indices follow the member order of the type's
/// [`CompositeInfo`](crate::info::CompositeInfo), properties included.
pub trait Composite: Transcode {
    /// Read the member at `index`.
    fn member(&self, index: usize) -> Option<MemberValue<'_>>;

    /// Mutable access to a stored field, `None` for properties and
    /// read-only fields.
    fn member_mut(&mut self, index: usize) -> Option<&mut dyn Transcode>;

    /// Assign the member at `index`.
    ///
    /// Returns the value back if the index is out of range, the member is
    /// not writable, or the value's type does not match.
    fn set_member(
        &mut self,
        index: usize,
        value: Box<dyn Transcode>,
    ) -> Result<(), Box<dyn Transcode>>;

    fn member_count(&self) -> usize;
}
