//! Built-in implementations of [`Transcode`] and [`Typed`].
//!
//! ## Implemented Menu
//!
//! - atomic:
//!     - `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`, `f32`, `f64`, `String`
//!     - `rust_decimal::Decimal`, `uuid::Uuid`
//!     - `chrono`: `NaiveDateTime`, `NaiveDate`, `DateTime<Utc>`, `DateTime<FixedOffset>`, `TimeDelta`
//!     - `core::time::Duration`
//! - nullable: `Option<T>`
//! - collections:
//!     - `[T; N]`, `Box<[T]>`
//!     - `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`
//!     - `BTreeSet<T>`, `std::collections::HashSet<T, S>`, `hashbrown::HashSet<T, S>`
//! - dictionaries: `BTreeMap<K, V>`, `std::collections::HashMap<K, V, S>`, `hashbrown::HashMap<K, V, S>`
//! - pairs: `(K, V)`
//! - opaque, rejected by the metadata cache:
//!     - `std::time::Instant`, `core::any::TypeId`
//!     - `std::sync::Mutex<T>`, `std::sync::RwLock<T>`, `std::sync::OnceLock<T>`
//!
//! The crate's own containers live in [`collections`](crate::collections).
//!
//! [`Transcode`]: crate::Transcode
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod array;
mod atomic;
mod list;
mod map;
mod option;
mod pair;
mod set;
mod unsupported;

use core::fmt;

use crate::ops::{Collection, Dictionary};

// -----------------------------------------------------------------------------
// Debug helpers

/// `transcode_debug` of collections: the elements as a list.
pub(crate) fn collection_debug(value: &dyn Collection, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(value.items()).finish()
}

/// `transcode_debug` of dictionaries: the entries as a map.
pub(crate) fn dictionary_debug(value: &dyn Dictionary, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(value.entries()).finish()
}
