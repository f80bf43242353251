use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, ImplGenerics, LitStr, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Information shared by every derived implementation of one type.
pub(crate) struct TranscodeMeta<'a> {
    vc_transcode_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for TranscodeMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TranscodeMeta")
            .field("vc_transcode_path", &self.vc_transcode_path.to_token_stream())
            .field("ident", &self.ident)
            .finish_non_exhaustive()
    }
}

impl<'a> TranscodeMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            vc_transcode_path: crate::path::vc_transcode(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn vc_transcode_path(&self) -> &Path {
        &self.vc_transcode_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// The type name without generics, used by the debug output.
    #[inline]
    pub fn name_lit(&self) -> LitStr {
        LitStr::new(&self.ident.to_string(), self.ident.span())
    }

    /// Whether the `Typed` implementation needs a `GenericTypeInfoCell`.
    pub fn impl_with_generic(&self) -> bool {
        !self
            .generics
            .params
            .iter()
            .all(|param| matches!(param, GenericParam::Lifetime(_)))
    }

    /// Split the generics, adding the bounds the generated code relies on.
    ///
    /// For generic types every type parameter gets `Send + Sync + 'static`
    /// and every member type gets `Transcode + Typed`. The type itself gets
    /// `Default` unless `no_default` is declared. Non-generic types keep
    /// their where clause unchanged.
    pub fn split_generics(
        &self,
        member_types: &[&Type],
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if !self.impl_with_generic() {
            return (impl_generics, ty_generics, where_clause.to_token_stream());
        }

        let vc_transcode_path = &self.vc_transcode_path;
        let transcode_ = crate::path::transcode_(vc_transcode_path);
        let typed_ = crate::path::typed_(vc_transcode_path);

        let existing = where_clause
            .map(|clause| {
                clause
                    .predicates
                    .iter()
                    .map(ToTokens::to_token_stream)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let params = self.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote!(#ident: ::core::marker::Send + ::core::marker::Sync + 'static)
        });

        let members = member_types
            .iter()
            .map(|ty| quote!(#ty: #transcode_ + #typed_));

        let default = match self.attrs.no_default {
            Some(_) => crate::utils::empty(),
            None => {
                let ident = self.ident;
                let default_ = crate::path::default_();
                quote!(#ident #ty_generics: #default_,)
            }
        };

        let where_tokens = quote! {
            where #(#existing,)* #(#params,)* #(#members,)* #default
        };

        (impl_generics, ty_generics, where_tokens)
    }

    /// Generate the type-level conversion, if declared.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// .with_conversion(_path_::Conversion::for_type::<Self, C>())
    /// ```
    pub fn with_conversion_expression(&self) -> TokenStream {
        match &self.attrs.converter {
            Some(converter) => {
                let conversion_ = crate::path::conversion_(&self.vc_transcode_path);
                quote! {
                    .with_conversion(#conversion_::for_type::<Self, #converter>())
                }
            }
            None => crate::utils::empty(),
        }
    }
}
