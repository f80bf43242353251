use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type};

use crate::derive_data::TranscodeMeta;

/// Generate implementation code for `Transcode`.
///
/// `kind` is the variant of `TranscodeRef`/`TranscodeMut` the type is
/// exposed as, `debug_tokens` the body of `transcode_debug` (with `f` in scope).
pub(crate) fn impl_trait_transcode(
    meta: &TranscodeMeta,
    kind: Ident,
    debug_tokens: TokenStream,
    member_types: &[&Type],
) -> TokenStream {
    let vc_transcode_path = meta.vc_transcode_path();
    let transcode_ = crate::path::transcode_(vc_transcode_path);
    let transcode_ref_ = crate::path::transcode_ref_(vc_transcode_path);
    let transcode_mut_ = crate::path::transcode_mut_(vc_transcode_path);
    let box_ = crate::path::box_(vc_transcode_path);
    let result_ = crate::path::result_();
    let fmt_ = crate::path::fmt_();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(member_types);

    quote! {
        impl #impl_generics #transcode_ for #ident #ty_generics #where_clause {
            fn set(
                &mut self,
                value: #box_<dyn #transcode_>,
            ) -> #result_<(), #box_<dyn #transcode_>> {
                *self = value.take::<Self>()?;
                #result_::Ok(())
            }

            #[inline]
            fn transcode_ref(&self) -> #transcode_ref_<'_> {
                #transcode_ref_::#kind(self)
            }

            #[inline]
            fn transcode_mut(&mut self) -> #transcode_mut_<'_> {
                #transcode_mut_::#kind(self)
            }

            fn transcode_debug(&self, f: &mut #fmt_::Formatter<'_>) -> #fmt_::Result {
                #debug_tokens
            }
        }
    }
}
