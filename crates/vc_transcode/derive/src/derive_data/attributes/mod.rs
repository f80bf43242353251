//! Parsing of `#[transcode(..)]` attributes.
//!
//! Type level: `converter = C`, `no_default`, `property(..)`. A property
//! accepts `ignore`, `include`, `obsolete` and `converter = C` as well.
//! Member level: `ignore`, `include`, `readonly`, `obsolete`, `converter = C`,
//! `rename = ".."`. `#[deprecated]` on a member counts as `obsolete`.

// -----------------------------------------------------------------------------
// Modules

mod member_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use member_attributes::MemberAttributes;
pub(crate) use type_attributes::{PropertyAttribute, TypeAttributes};

use syn::meta::ParseNestedMeta;
use syn::{LitStr, Path};

pub(crate) const TRANSCODE_ATTRIBUTE_NAME: &str = "transcode";

/// Parse `converter = C`, rejecting a second declaration.
fn parse_converter(meta: &ParseNestedMeta, slot: &mut Option<Path>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("at most one converter can be declared"));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// Parse `rename = "name"`.
fn parse_rename(meta: &ParseNestedMeta, slot: &mut Option<LitStr>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `rename`"));
    }
    let name: LitStr = meta.value()?.parse()?;
    if name.value().is_empty() {
        return Err(syn::Error::new(name.span(), "a member name cannot be empty"));
    }
    *slot = Some(name);
    Ok(())
}
