use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{impl_trait_transcode, impl_trait_typed};

use crate::derive_data::TranscodeEnum;

/// Implement `Typed`, `Transcode`, `Atomic` and `FromAtomic` for a fieldless enum.
pub(crate) fn impl_enum(info: &TranscodeEnum) -> TokenStream {
    let meta = info.meta();

    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens(), &[]);

    let names = info.variants().iter().map(|variant| {
        let ident = variant.ident;
        let name = &variant.name;
        quote!(Self::#ident => #name,)
    });
    let debug_tokens = quote! {
        f.write_str(match *self {
            #(#names)*
        })
    };

    let transcode_trait_tokens =
        impl_trait_transcode(meta, format_ident!("Atomic"), debug_tokens, &[]);

    let atomic_trait_tokens = impl_trait_atomic(info);

    quote! {
        #typed_trait_tokens

        #transcode_trait_tokens

        #atomic_trait_tokens
    }
}

/// Generate `Atomic` and `FromAtomic` trait implementation tokens.
///
/// Values are matched by variant name, the discriminant only travels along.
fn impl_trait_atomic(info: &TranscodeEnum) -> TokenStream {
    let meta = info.meta();
    let vc_transcode_path = meta.vc_transcode_path();
    let atomic_ = crate::path::atomic_(vc_transcode_path);
    let from_atomic_ = crate::path::from_atomic_(vc_transcode_path);
    let atomic_value_ = crate::path::atomic_value_(vc_transcode_path);
    let enum_value_ = crate::path::enum_value_(vc_transcode_path);
    let typed_ = crate::path::typed_(vc_transcode_path);
    let result_ = crate::path::result_();

    let to_parts = info.variants().iter().map(|variant| {
        let ident = variant.ident;
        let name = &variant.name;
        quote!(Self::#ident => (#name, Self::#ident as i64),)
    });

    let from_names = info.variants().iter().map(|variant| {
        let ident = variant.ident;
        let name = &variant.name;
        quote!(#name => #result_::Ok(Self::#ident),)
    });

    let ident = meta.ident();

    quote! {
        impl #atomic_ for #ident {
            fn to_atomic(&self) -> #atomic_value_ {
                let (name, discriminant) = match *self {
                    #(#to_parts)*
                };
                #atomic_value_::Enum(#enum_value_::new(
                    <Self as #typed_>::type_info(),
                    name,
                    discriminant,
                ))
            }
        }

        impl #from_atomic_ for #ident {
            fn from_atomic(value: #atomic_value_) -> #result_<Self, #atomic_value_> {
                match value {
                    #atomic_value_::Enum(variant) if variant.is::<Self>() => match variant.name() {
                        #(#from_names)*
                        _ => #result_::Err(#atomic_value_::Enum(variant)),
                    },
                    other => #result_::Err(other),
                }
            }
        }
    }
}
