use crate::convert::Conversion;
use crate::info::{MemberInfo, TypeInfo};

/// A member selected for transcoding by the [`MetadataCache`](crate::cache::MetadataCache).
///
/// `index` is the position of the member in its owner's declaration, the
/// index expected by [`Composite::member`](crate::ops::Composite::member).
#[derive(Debug, Clone, Copy)]
pub struct MemberDescriptor {
    index: usize,
    info: &'static MemberInfo,
    owner: &'static TypeInfo,
}

impl MemberDescriptor {
    #[inline]
    pub(crate) const fn new(index: usize, info: &'static MemberInfo, owner: &'static TypeInfo) -> Self {
        Self { index, info, owner }
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.info.name()
    }

    #[inline]
    pub const fn info(&self) -> &'static MemberInfo {
        self.info
    }

    /// The type declaring the member.
    #[inline]
    pub const fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    /// The declared type of the member.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info.type_info()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.info.is_writable()
    }

    /// The member-level conversion, if declared.
    #[inline]
    pub fn conversion(&self) -> Option<&'static Conversion> {
        self.info.conversion()
    }
}
