//! Containers provided by the crate.
//!
//! - [`Stack`]: a LIFO collection, iterated in pop order.
//! - [`ReadOnlyMap`]: a dictionary that cannot be mutated after construction.
//! - [`AnyValue`]: a nullable value of any transcodable type, the abstract
//!   declared type of a member.
//! - [`UntypedList`], [`UntypedMap`] and [`DictionaryEntry`]: heterogeneous
//!   containers of [`AnyValue`]s.

// -----------------------------------------------------------------------------
// Modules

mod any_value;
mod read_only_map;
mod stack;
mod untyped;

// -----------------------------------------------------------------------------
// Exports

pub use any_value::AnyValue;
pub use read_only_map::ReadOnlyMap;
pub use stack::Stack;
pub use untyped::{DictionaryEntry, UntypedList, UntypedMap};
