//! The dynamic representation.
//!
//! - [`Value`]: null, an [`AtomicValue`], a nested [`DynamicObject`] or a sequence.
//! - [`DynamicObject`]: the name-keyed property bag standing in for a typed instance.
//! - [`EventHandler`]: callback list used for change notification.

// -----------------------------------------------------------------------------
// Modules

mod atomic;
mod event;
mod object;
mod repr;

// -----------------------------------------------------------------------------
// Exports

pub use atomic::{AtomicValue, EnumValue};
pub use event::EventHandler;
pub use object::{DynamicObject, MemberChanged};
pub use repr::Value;
