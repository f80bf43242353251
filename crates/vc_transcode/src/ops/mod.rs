//! Shape-specific traits implemented by transcodable types.
//!
//! [`Transcode::transcode_ref`](crate::Transcode::transcode_ref) returns a
//! [`TranscodeRef`], which exposes one of these traits:
//!
//! - [`Atomic`] and [`FromAtomic`]: conversion to and from [`AtomicValue`](crate::AtomicValue).
//! - [`Nullable`]: `Option<T>`.
//! - [`Collection`]: homogeneous iteration.
//! - [`Dictionary`]: key/value enumeration.
//! - [`Pair`]: the two slots of a key/value pair.
//! - [`Composite`]: index-based member access.

// -----------------------------------------------------------------------------
// Modules

mod atomic;
mod composite;
mod container;
mod kind;

// -----------------------------------------------------------------------------
// Exports

pub use atomic::{Atomic, FromAtomic};
pub use composite::{Composite, MemberValue};
pub use container::{Collection, Dictionary, Nullable, Pair};
pub use kind::{TranscodeMut, TranscodeRef};
