use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};

use super::{impl_trait_transcode, impl_trait_typed};

use crate::derive_data::TranscodeStruct;

/// Implement `Typed`, `Transcode` and `Composite` for a struct.
pub(crate) fn impl_composite(info: &TranscodeStruct) -> TokenStream {
    let meta = info.meta();
    let member_types = info.member_types();

    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens(), &member_types);

    let transcode_trait_tokens = impl_trait_transcode(
        meta,
        format_ident!("Composite"),
        get_composite_debug_impl(info),
        &member_types,
    );

    let composite_trait_tokens = impl_trait_composite(info);

    quote! {
        #typed_trait_tokens

        #transcode_trait_tokens

        #composite_trait_tokens
    }
}

/// Fields are printed through their own `transcode_debug`, properties are left out.
fn get_composite_debug_impl(info: &TranscodeStruct) -> TokenStream {
    let vc_transcode_path = info.meta().vc_transcode_path();
    let transcode_ = crate::path::transcode_(vc_transcode_path);
    let name = info.meta().name_lit();

    if info.fields().is_empty() {
        return quote!(f.write_str(#name));
    }

    let fields = info.fields().iter().map(|field| {
        let ty = field.ty;
        let access = &field.access;
        let value = quote!(&<#ty as #transcode_>::as_transcode(&self.#access));
        if info.is_tuple() {
            quote!(.field(#value))
        } else {
            let field_name = access.to_token_stream().to_string();
            quote!(.field(#field_name, #value))
        }
    });

    if info.is_tuple() {
        quote!(f.debug_tuple(#name) #(#fields)* .finish())
    } else {
        quote!(f.debug_struct(#name) #(#fields)* .finish())
    }
}

/// Generate `Composite` trait implementation tokens.
fn impl_trait_composite(info: &TranscodeStruct) -> TokenStream {
    let meta = info.meta();
    let vc_transcode_path = meta.vc_transcode_path();
    let composite_ = crate::path::composite_(vc_transcode_path);
    let member_value_ = crate::path::member_value_(vc_transcode_path);
    let transcode_ = crate::path::transcode_(vc_transcode_path);
    let box_ = crate::path::box_(vc_transcode_path);
    let option_ = crate::path::option_();
    let result_ = crate::path::result_();

    // member

    let field_reads = info.fields().iter().map(|field| {
        let index = field.index;
        let access = &field.access;
        quote!(#index => #option_::Some(#member_value_::Borrowed(&self.#access)),)
    });

    let property_reads = info.properties().map(|(index, property)| {
        let get = &property.get;
        quote!(#index => #option_::Some(#member_value_::Owned(#box_::new(#get(self)))),)
    });

    // member_mut

    let field_writes = info
        .fields()
        .iter()
        .filter(|field| !field.attrs.readonly)
        .map(|field| {
            let index = field.index;
            let access = &field.access;
            quote!(#index => #option_::Some(&mut self.#access),)
        });

    // set_member

    let field_sets = info
        .fields()
        .iter()
        .filter(|field| !field.attrs.readonly)
        .map(|field| {
            let index = field.index;
            let access = &field.access;
            let ty = field.ty;
            quote!(#index => <#ty as #transcode_>::set(&mut self.#access, value),)
        });

    let property_sets = info.properties().filter_map(|(index, property)| {
        let set = property.set.as_ref()?;
        let ty = &property.ty;
        Some(quote! {
            #index => {
                let value = value.take::<#ty>()?;
                #set(self, value);
                #result_::Ok(())
            }
        })
    });

    let member_count = info.member_count();

    let ident = meta.ident();
    let member_types = info.member_types();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&member_types);

    quote! {
        impl #impl_generics #composite_ for #ident #ty_generics #where_clause {
            fn member(&self, index: usize) -> #option_<#member_value_<'_>> {
                match index {
                    #(#field_reads)*
                    #(#property_reads)*
                    _ => #option_::None,
                }
            }

            fn member_mut(&mut self, index: usize) -> #option_<&mut dyn #transcode_> {
                match index {
                    #(#field_writes)*
                    _ => #option_::None,
                }
            }

            fn set_member(
                &mut self,
                index: usize,
                value: #box_<dyn #transcode_>,
            ) -> #result_<(), #box_<dyn #transcode_>> {
                match index {
                    #(#field_sets)*
                    #(#property_sets)*
                    _ => #result_::Err(value),
                }
            }

            #[inline]
            fn member_count(&self) -> usize {
                #member_count
            }
        }
    }
}
