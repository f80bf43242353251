//! Static type information consumed by the transcoders.
//!
//! ## Menu
//!
//! - [`Typed`]: static accessor to a type's [`TypeInfo`], and its object-safe twin [`DynamicTyped`].
//! - [`Type`]: a `TypeId` plus the display path and generic-definition path of a type.
//! - [`Capabilities`]: the capability set a type reports (iterable, associative, pair, ...).
//! - [`TypeInfo`]: a closed enum describing the shape of a type, the inner is one of following:
//!     - [`AtomicInfo`]: primitives, strings, decimals, date/time values, GUIDs and fieldless enums.
//!     - [`NullableInfo`]: `Option<T>`.
//!     - [`CollectionInfo`]: arrays, lists, sets, stacks and untyped lists.
//!     - [`DictionaryInfo`]: typed, untyped and read-only maps.
//!     - [`PairInfo`]: key/value pairs and untyped dictionary entries.
//!     - [`CompositeInfo`]: structs walked member by member.
//!     - [`AbstractInfo`]: [`AnyValue`](crate::collections::AnyValue), whose shape is only known at runtime.
//!     - [`OpaqueInfo`]: types outside the conversion taxonomy (event handlers, not-supported types).
//! - [`classify`]: the type classifier.
//! - [`NonGenericTypeInfoCell`] and [`GenericTypeInfoCell`]: static storage used to implement [`Typed`].

// -----------------------------------------------------------------------------
// Modules

mod atomic_info;
mod capabilities;
mod cell;
mod classify;
mod composite_info;
mod container_info;
mod pair_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use atomic_info::{AtomicInfo, AtomicKind, EnumVariant};
pub use capabilities::Capabilities;
pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use classify::{TypeClass, classify, is_atomic, is_collection, is_dictionary, is_pair, is_stack};
pub use composite_info::{CompositeInfo, MemberFlags, MemberInfo, MemberKind};
pub use container_info::{
    CollectionInfo, CollectionShape, DictionaryInfo, DictionaryShape, NullableInfo,
};
pub use pair_info::{PairInfo, PairKind};
pub use ty::Type;
pub use type_info::{AbstractInfo, OpaqueInfo, TypeInfo};
pub use typed::{DynamicTyped, Typed};
