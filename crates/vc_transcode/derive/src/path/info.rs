use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn typed_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn composite_info_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::CompositeInfo
    }
}

#[inline(always)]
pub(crate) fn member_info_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::MemberInfo
    }
}

#[inline(always)]
pub(crate) fn member_flags_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::MemberFlags
    }
}

#[inline(always)]
pub(crate) fn atomic_info_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::AtomicInfo
    }
}

#[inline(always)]
pub(crate) fn enum_variant_(vc_transcode_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_transcode_path::info::EnumVariant
    }
}
