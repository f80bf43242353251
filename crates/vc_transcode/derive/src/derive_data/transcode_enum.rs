use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, Fields, Ident, LitStr};

use super::{MemberAttributes, TranscodeMeta};

/// A variant of a fieldless enum.
pub(crate) struct TranscodeVariant<'a> {
    pub ident: &'a Ident,
    /// The name used in the dynamic representation, `rename` applied.
    pub name: LitStr,
}

/// A fieldless enum, derived as an atomic type.
pub(crate) struct TranscodeEnum<'a> {
    meta: TranscodeMeta<'a>,
    variants: Vec<TranscodeVariant<'a>>,
}

impl<'a> TranscodeEnum<'a> {
    pub fn new(meta: TranscodeMeta<'a>, data: &'a DataEnum) -> syn::Result<Self> {
        let mut variants = Vec::with_capacity(data.variants.len());

        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "`Transcode` can only be derived for enums without fields",
                ));
            }
            let name = MemberAttributes::parse_variant_attrs(&variant.attrs)?
                .unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));
            if variants
                .iter()
                .any(|other: &TranscodeVariant| other.name.value() == name.value())
            {
                return Err(syn::Error::new(name.span(), "duplicate variant name"));
            }
            variants.push(TranscodeVariant {
                ident: &variant.ident,
                name,
            });
        }

        Ok(Self { meta, variants })
    }

    #[inline]
    pub fn meta(&self) -> &TranscodeMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[TranscodeVariant<'a>] {
        &self.variants
    }

    /// Generate the `TypeInfo` expression.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// _path_::TypeInfo::Atomic(
    ///     _path_::AtomicInfo::new_enum::<Self>(&[
    ///         _path_::EnumVariant::new("Red", Self::Red as i64),
    ///     ])
    ///     .with_conversion(...)
    /// )
    /// ```
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_transcode_path = self.meta.vc_transcode_path();
        let type_info_ = crate::path::type_info_(vc_transcode_path);
        let atomic_info_ = crate::path::atomic_info_(vc_transcode_path);
        let enum_variant_ = crate::path::enum_variant_(vc_transcode_path);

        let variants = self.variants.iter().map(|variant| {
            let ident = variant.ident;
            let name = &variant.name;
            quote!(#enum_variant_::new(#name, Self::#ident as i64))
        });

        let with_conversion = self.meta.with_conversion_expression();

        quote! {
            #type_info_::Atomic(
                #atomic_info_::new_enum::<Self>(&[ #(#variants),* ])
                    #with_conversion
            )
        }
    }
}
