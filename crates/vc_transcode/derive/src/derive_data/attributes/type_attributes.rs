use proc_macro2::Span;
use syn::{Attribute, LitStr, Path, Type};

use super::{MemberAttributes, TRANSCODE_ATTRIBUTE_NAME, parse_converter};

/// A member backed by accessor methods instead of a stored field.
///
/// Format: `property(name = "area", ty = f64, get = Self::area, set = Self::set_area)`,
/// `set` is optional. The getter is called as `get(&self) -> ty`, the setter
/// as `set(&mut self, ty)`.
///
/// The member markers `ignore`, `include`, `obsolete` and `converter = C`
/// are accepted in the same list. A property without setter is read-only,
/// so `readonly` and `rename` are not.
pub(crate) struct PropertyAttribute {
    pub name: LitStr,
    pub ty: Type,
    pub get: Path,
    pub set: Option<Path>,
    pub attrs: MemberAttributes,
}

/// Attributes declared on the type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[transcode(converter = C)]`: a type-level conversion.
    pub converter: Option<Path>,
    /// `#[transcode(no_default)]`: do not register `Default::default` as
    /// the constructor used by the reverse transcoder.
    pub no_default: Option<Span>,
    pub properties: Vec<PropertyAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(TRANSCODE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("converter") {
                    parse_converter(&meta, &mut this.converter)
                } else if meta.path.is_ident("no_default") {
                    this.no_default = Some(meta.input.span());
                    Ok(())
                } else if meta.path.is_ident("property") {
                    let property = PropertyAttribute::parse(&meta)?;
                    if this
                        .properties
                        .iter()
                        .any(|other| other.name.value() == property.name.value())
                    {
                        return Err(syn::Error::new(
                            property.name.span(),
                            "duplicate property name",
                        ));
                    }
                    this.properties.push(property);
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported type attribute, expected `converter`, `no_default` or `property`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

impl PropertyAttribute {
    fn parse(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut ty: Option<Type> = None;
        let mut get: Option<Path> = None;
        let mut set: Option<Path> = None;
        let mut attrs = MemberAttributes::default();

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("ty") {
                ty = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("get") {
                get = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("set") {
                set = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("ignore") {
                attrs.ignore = true;
            } else if inner.path.is_ident("include") {
                attrs.include = true;
            } else if inner.path.is_ident("obsolete") {
                attrs.obsolete = true;
            } else if inner.path.is_ident("converter") {
                parse_converter(&inner, &mut attrs.converter)?;
            } else {
                return Err(inner.error(
                    "expected one of `name`, `ty`, `get`, `set`, \
                     `ignore`, `include`, `obsolete`, `converter`",
                ));
            }
            Ok(())
        })?;

        match (name, ty, get) {
            (Some(name), Some(ty), Some(get)) => Ok(Self {
                name,
                ty,
                get,
                set,
                attrs,
            }),
            _ => Err(meta.error("a property needs `name`, `ty` and `get`")),
        }
    }
}
