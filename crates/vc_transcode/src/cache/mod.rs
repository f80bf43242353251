//! Per-type member lists and conversion lookups, computed once.
//!
//! ## Menu
//!
//! - [`MetadataCache`]: the registry, with a process-wide [`MetadataCache::global`]
//!   instance. Independent instances can be created for isolated use.
//! - [`MemberDescriptor`]: a member selected for transcoding.
//!
//! ## Member selection
//!
//! A member of a composite is enumerated when it is writable, not marked
//! `#[transcode(ignore)]`, not obsolete (`#[deprecated]`) and not an
//! [`EventHandler`](crate::value::EventHandler). `#[transcode(include)]`
//! overrides every exclusion. Both slots of a pair are always enumerated.
//!
//! Enumerating a member whose type cannot be transcoded (`Instant`, `TypeId`,
//! `Mutex<T>`, `RwLock<T>`, `OnceLock<T>`) fails with
//! [`ConfigError::NotSupported`](crate::ConfigError::NotSupported).
//!
//! ## auto_register
//!
//! With the `auto_register` feature, the conversions declared through
//! [`register_conversion!`](crate::register_conversion) are declared on the
//! global instance when it is first accessed.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod metadata_cache;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::MemberDescriptor;
pub use metadata_cache::MetadataCache;
