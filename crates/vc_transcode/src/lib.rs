#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_transcode::...` paths (resolved through
// `vc_macro_utils::Manifest`), so the crate must be able to name itself
// the same way in unit tests and doc tests.
extern crate self as vc_transcode;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod transcode;
mod type_map;

pub mod adapter;
pub mod cache;
pub mod coerce;
pub mod collections;
pub mod convert;
pub mod impls;
pub mod info;
pub mod ops;
pub mod transcoder;
pub mod value;

/// Derive macros, re-exported from `vc_transcode_derive`.
pub mod derive {
    pub use vc_transcode_derive::Transcode;
}

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{CapabilityError, CoerceError, ConfigError, ShapeError, TranscodeError};
pub use transcode::Transcode;
pub use transcoder::{Skipped, ToDynamic, TranscodeConfig, Transcoded, Transcoder, to_dynamic};
pub use value::{AtomicValue, DynamicObject, Value};

pub use vc_transcode_derive::Transcode;
