use alloc::boxed::Box;

use crate::info::{MemberInfo, Type, Typed};
use crate::{ShapeError, Transcode, TranscodeError};

/// Constructor of a pair from its key and value.
pub type PairConstructor =
    fn(Box<dyn Transcode>, Box<dyn Transcode>) -> Result<Box<dyn Transcode>, TranscodeError>;

// -----------------------------------------------------------------------------
// PairKind

/// Typed key/value pair or untyped dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// `(K, V)`.
    KeyValue,
    /// [`DictionaryEntry`](crate::collections::DictionaryEntry).
    Entry,
}

// -----------------------------------------------------------------------------
// PairInfo

/// Type information for two-slot key/value structures.
///
/// The slots are exposed as the members `Key` and `Value`. They are always
/// transcoded, the member selection rules do not apply to them.
#[derive(Clone)]
pub struct PairInfo {
    ty: Type,
    kind: PairKind,
    members: [MemberInfo; 2],
    construct: Option<PairConstructor>,
}

impl PairInfo {
    /// Name of the key slot in the dynamic representation.
    pub const KEY: &'static str = "Key";
    /// Name of the value slot in the dynamic representation.
    pub const VALUE: &'static str = "Value";

    /// Create info for the pair `P` with slots of type `K` and `V`.
    pub fn new<P: Typed, K: Typed, V: Typed>(kind: PairKind) -> Self {
        Self {
            ty: Type::of::<P>(),
            kind,
            members: [
                MemberInfo::field::<K>(Self::KEY),
                MemberInfo::field::<V>(Self::VALUE),
            ],
            construct: None,
        }
    }

    /// Register the two-argument constructor.
    #[inline]
    pub fn with_constructor(mut self, construct: PairConstructor) -> Self {
        self.construct = Some(construct);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> PairKind {
        self.kind
    }

    /// The `Key` and `Value` slots, in that order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    #[inline]
    pub fn key_member(&self) -> &MemberInfo {
        &self.members[0]
    }

    #[inline]
    pub fn value_member(&self) -> &MemberInfo {
        &self.members[1]
    }

    /// Build the pair from its transcoded key and value.
    pub fn construct(
        &self,
        key: Box<dyn Transcode>,
        value: Box<dyn Transcode>,
    ) -> Result<Box<dyn Transcode>, TranscodeError> {
        match self.construct {
            Some(construct) => construct(key, value),
            None => Err(ShapeError::MissingPairConstructor {
                ty: self.ty.path(),
            }
            .into()),
        }
    }
}
