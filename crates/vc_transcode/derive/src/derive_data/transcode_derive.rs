use syn::{Data, DeriveInput, GenericParam, spanned::Spanned};

use super::{TranscodeEnum, TranscodeMeta, TranscodeStruct, TypeAttributes};

/// The parsed input of `#[derive(Transcode)]`.
pub(crate) enum TranscodeDerive<'a> {
    /// Structs of every form become composites.
    Composite(TranscodeStruct<'a>),
    /// Fieldless enums become atomic.
    Enum(TranscodeEnum<'a>),
}

impl<'a> TranscodeDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(lifetime) = input
            .generics
            .params
            .iter()
            .find(|param| matches!(param, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Transcode` types must be `'static`, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        match &input.data {
            Data::Struct(data) => {
                let meta = TranscodeMeta::new(attrs, &input.ident, &input.generics);
                TranscodeStruct::new(meta, &data.fields).map(Self::Composite)
            }
            Data::Enum(data) => {
                if !input.generics.params.is_empty() {
                    return Err(syn::Error::new(
                        input.generics.span(),
                        "fieldless enums deriving `Transcode` cannot be generic",
                    ));
                }
                if let Some(span) = attrs.no_default {
                    return Err(syn::Error::new(span, "`no_default` only applies to structs"));
                }
                if let Some(property) = attrs.properties.first() {
                    return Err(syn::Error::new(
                        property.name.span(),
                        "properties only apply to structs",
                    ));
                }
                let meta = TranscodeMeta::new(attrs, &input.ident, &input.generics);
                TranscodeEnum::new(meta, data).map(Self::Enum)
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "`Transcode` cannot be derived for unions",
            )),
        }
    }
}
