//! Paths of the items the generated code refers to.
//!
//! Kept in one place so that moving an item inside `vc_transcode` only
//! needs a change here.
//!
//! The only special case is the path of `vc_transcode` itself, see
//! [`vc_transcode`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_transcode` crate.
///
/// 1. For crates that depend on `vc_transcode`, `::vc_transcode` is returned.
/// 2. For crates that depend on `vc_graph`, `::vc_graph::transcode` is returned.
/// 3. Otherwise `::vc_transcode` is returned, which may be incorrect.
///
/// Reading the caller's manifest is relatively expensive, so the path is
/// resolved once per derive invocation and passed around.
pub(crate) fn vc_transcode() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_transcode"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod ops;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use ops::*;

#[inline(always)]
pub(crate) fn transcode_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::Transcode
    }
}

#[inline(always)]
pub(crate) fn box_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::__macro_exports::Box
    }
}

#[inline(always)]
pub(crate) fn atomic_value_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::value::AtomicValue
    }
}

#[inline(always)]
pub(crate) fn enum_value_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::value::EnumValue
    }
}

#[inline(always)]
pub(crate) fn conversion_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::convert::Conversion
    }
}

// -----------------------------------------------------------------------------
// Core Paths

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote!(::core::option::Option)
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote!(::core::result::Result)
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote!(::core::default::Default)
}

#[inline(always)]
pub(crate) fn fmt_() -> TokenStream {
    quote!(::core::fmt)
}
