use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn transcode_ref_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::ops::TranscodeRef
    }
}

#[inline(always)]
pub(crate) fn transcode_mut_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::ops::TranscodeMut
    }
}

#[inline(always)]
pub(crate) fn composite_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::ops::Composite
    }
}

#[inline(always)]
pub(crate) fn member_value_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::ops::MemberValue
    }
}

#[inline(always)]
pub(crate) fn atomic_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::ops::Atomic
    }
}

#[inline(always)]
pub(crate) fn from_atomic_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::ops::FromAtomic
    }
}
