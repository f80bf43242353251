use alloc::string::String;

use thiserror::Error;

use crate::info::AtomicKind;

// -----------------------------------------------------------------------------
// ConfigError

/// Errors raised while declaring conversions or building metadata for a type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("member `{member}` of `{ty}` has the not-supported type `{member_ty}`")]
    NotSupported {
        ty: &'static str,
        member: &'static str,
        member_ty: &'static str,
    },
    #[error("type `{ty}` already has a conversion declaration")]
    DuplicateConversion { ty: &'static str },
    #[error("conversion for `{ty}` declared after its lookup was resolved")]
    AlreadyResolved { ty: &'static str },
    #[error("type `{ty}` has no members to enumerate")]
    NotComposite { ty: &'static str },
    #[error("converter on member `{member}` of `{ty}` expects `{expected}`, the member is `{found}`")]
    ConverterMismatch {
        ty: &'static str,
        member: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// ShapeError

/// Errors raised when a value or representation does not fit the requested type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("mismatched types: expected `{expected}`, found `{found}`")]
    MismatchedTypes {
        expected: &'static str,
        found: &'static str,
    },
    #[error("pair type `{ty}` has no two-argument constructor")]
    MissingPairConstructor { ty: &'static str },
    #[error("pair representation for `{ty}` lacks the `{slot}` member")]
    MissingPairSlot { ty: &'static str, slot: &'static str },
    #[error("no adapter for the container shape of `{ty}`")]
    UnrecognizedShape { ty: &'static str },
    #[error("`{ty}` cannot be represented as a dynamic object")]
    NotComposite { ty: &'static str },
    #[error("`{ty}` has no default constructor")]
    NotConstructible { ty: &'static str },
    #[error("`{ty}` cannot hold a null value")]
    NotNullable { ty: &'static str },
    #[error("expected a {expected} value for `{ty}`")]
    UnexpectedValue {
        ty: &'static str,
        expected: &'static str,
    },
    #[error("array `{ty}` expects {expected} elements, found {found}")]
    LengthMismatch {
        ty: &'static str,
        expected: usize,
        found: usize,
    },
}

// -----------------------------------------------------------------------------
// CapabilityError

/// Errors raised by an adapter when the wrapped container lacks a capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("`{operation}` needs index access, which `{ty}` does not provide")]
    NotIndexable {
        ty: &'static str,
        operation: &'static str,
    },
    #[error("`{operation}` is not supported on the read-only `{ty}`")]
    ReadOnly {
        ty: &'static str,
        operation: &'static str,
    },
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
}

// -----------------------------------------------------------------------------
// CoerceError

/// Reasons a value could not be coerced into an atomic target.
///
/// Coercion itself never fails loudly (see [`coerce`](crate::coerce::coerce)),
/// these are reported through logs and skipped-member diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("cannot parse `{value}` as {target}")]
    Parse { value: String, target: AtomicKind },
    #[error("`{value}` is out of range for {target}")]
    Overflow { value: String, target: AtomicKind },
    #[error("no conversion from {from} to {to}")]
    Unsupported { from: AtomicKind, to: AtomicKind },
    #[error("`{variant}` is not a variant of `{ty}`")]
    UnknownVariant { ty: &'static str, variant: String },
    #[error("a non-atomic value cannot be coerced into `{ty}`")]
    NotAtomic { ty: &'static str },
    #[error("the value coerced to null, which `{ty}` cannot hold")]
    Null { ty: &'static str },
}

// -----------------------------------------------------------------------------
// TranscodeError

/// The error type of every transcoding operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    #[error(transparent)]
    Coerce(#[from] CoerceError),
    #[error("recursion depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },
    #[error("member `{member}` is not accessible on `{ty}`")]
    MissingMember {
        ty: &'static str,
        member: &'static str,
    },
    #[error("`{ty}` has no member named `{member}`")]
    UnknownMember { ty: &'static str, member: String },
}

impl TranscodeError {
    /// Shorthand for [`ShapeError::MismatchedTypes`].
    #[inline]
    pub fn mismatched(expected: &'static str, found: &'static str) -> Self {
        Self::Shape(ShapeError::MismatchedTypes { expected, found })
    }
}
