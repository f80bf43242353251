use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::TranscodeDerive;

/// Provided for `#[derive(Transcode)]`.
pub(crate) fn match_transcode_impls(ast: DeriveInput) -> TokenStream {
    // Parse type kind, attributes and members.
    let transcode_derive = match TranscodeDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let transcode_impls: proc_macro2::TokenStream = match transcode_derive {
        TranscodeDerive::Composite(info) => crate::impls::impl_composite(&info),
        TranscodeDerive::Enum(info) => crate::impls::impl_enum(&info),
    };

    // Members marked `#[deprecated]` are still read and written.
    TokenStream::from(quote! {
        #[allow(deprecated)]
        const _: () = {
            #transcode_impls
        };
    })
}
