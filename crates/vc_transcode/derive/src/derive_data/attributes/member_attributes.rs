use syn::{Attribute, LitStr, Path};

use super::{TRANSCODE_ATTRIBUTE_NAME, parse_converter, parse_rename};

/// Attributes declared on a field.
#[derive(Default)]
pub(crate) struct MemberAttributes {
    pub ignore: bool,
    /// Overrides every exclusion rule, `ignore` included.
    pub include: bool,
    pub readonly: bool,
    /// `#[transcode(obsolete)]` or `#[deprecated]`.
    pub obsolete: bool,
    pub converter: Option<Path>,
    pub rename: Option<LitStr>,
}

impl MemberAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if attr.path().is_ident("deprecated") {
                this.obsolete = true;
                continue;
            }
            if !attr.path().is_ident(TRANSCODE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    this.ignore = true;
                } else if meta.path.is_ident("include") {
                    this.include = true;
                } else if meta.path.is_ident("readonly") {
                    this.readonly = true;
                } else if meta.path.is_ident("obsolete") {
                    this.obsolete = true;
                } else if meta.path.is_ident("converter") {
                    parse_converter(&meta, &mut this.converter)?;
                } else if meta.path.is_ident("rename") {
                    parse_rename(&meta, &mut this.rename)?;
                } else {
                    return Err(meta.error(
                        "unsupported member attribute, expected one of \
                         `ignore`, `include`, `readonly`, `obsolete`, `converter`, `rename`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }

    /// Parse the attributes of an enum variant, where only `rename` applies.
    pub fn parse_variant_attrs(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
        let mut rename = None;
        for attr in attrs {
            if !attr.path().is_ident(TRANSCODE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    parse_rename(&meta, &mut rename)
                } else {
                    Err(meta.error("enum variants only support `rename`"))
                }
            })?;
        }
        Ok(rename)
    }
}
