use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, Index, LitStr, Member, Type, spanned::Spanned};

use super::{MemberAttributes, PropertyAttribute, TranscodeMeta};

/// A stored field of a derived composite.
pub(crate) struct StructField<'a> {
    /// Position in the member list.
    pub index: usize,
    /// Member name, `rename` applied. Tuple fields are named by position.
    pub name: LitStr,
    /// How the field is accessed: `self.#access`.
    pub access: Member,
    pub ty: &'a Type,
    pub attrs: MemberAttributes,
}

/// A struct (named, tuple or unit) derived as a composite.
///
/// Members are the fields in declaration order, followed by the
/// properties declared at type level.
pub(crate) struct TranscodeStruct<'a> {
    meta: TranscodeMeta<'a>,
    fields: Vec<StructField<'a>>,
    is_tuple: bool,
}

impl<'a> TranscodeStruct<'a> {
    pub fn new(meta: TranscodeMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let mut members: Vec<StructField<'a>> = Vec::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            let attrs = MemberAttributes::parse_attrs(&field.attrs)?;
            let (access, default_name) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
                None => (
                    Member::Unnamed(Index {
                        index: index as u32,
                        span: field.span(),
                    }),
                    index.to_string(),
                ),
            };
            let name = attrs
                .rename
                .clone()
                .unwrap_or_else(|| LitStr::new(&default_name, field.span()));

            members.push(StructField {
                index,
                name,
                access,
                ty: &field.ty,
                attrs,
            });
        }

        let this = Self {
            meta,
            fields: members,
            is_tuple: matches!(fields, Fields::Unnamed(_)),
        };
        this.check_names()?;
        Ok(this)
    }

    fn check_names(&self) -> syn::Result<()> {
        let mut seen: Vec<String> = Vec::with_capacity(self.member_count());
        let names = self
            .fields
            .iter()
            .map(|field| &field.name)
            .chain(self.properties().map(|(_, property)| &property.name));
        for name in names {
            let value = name.value();
            if seen.contains(&value) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("duplicate member name `{value}`"),
                ));
            }
            seen.push(value);
        }
        Ok(())
    }

    #[inline]
    pub fn meta(&self) -> &TranscodeMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    #[inline]
    pub fn is_tuple(&self) -> bool {
        self.is_tuple
    }

    /// Properties with their member index.
    pub fn properties(&self) -> impl Iterator<Item = (usize, &PropertyAttribute)> {
        let offset = self.fields.len();
        self.meta
            .attrs()
            .properties
            .iter()
            .enumerate()
            .map(move |(index, property)| (offset + index, property))
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.fields.len() + self.meta.attrs().properties.len()
    }

    /// Types that need `Transcode + Typed` bounds on generic types.
    pub fn member_types(&self) -> Vec<&Type> {
        self.fields
            .iter()
            .map(|field| field.ty)
            .chain(self.properties().map(|(_, property)| &property.ty))
            .collect()
    }

    /// The builder calls applying the markers and the converter of a member.
    fn member_modifiers(&self, attrs: &MemberAttributes) -> TokenStream {
        let vc_transcode_path = self.meta.vc_transcode_path();
        let member_flags_ = crate::path::member_flags_(vc_transcode_path);

        let mut flags = Vec::new();
        if attrs.ignore {
            flags.push(quote!(#member_flags_::IGNORE));
        }
        if attrs.include {
            flags.push(quote!(#member_flags_::INCLUDE));
        }
        if attrs.obsolete {
            flags.push(quote!(#member_flags_::OBSOLETE));
        }
        let with_flags = if flags.is_empty() {
            crate::utils::empty()
        } else {
            quote!(.with_flags(#(#flags)|*))
        };

        let without_writable = if attrs.readonly {
            quote!(.without_flags(#member_flags_::WRITABLE))
        } else {
            crate::utils::empty()
        };

        let with_conversion = match &attrs.converter {
            Some(converter) => {
                let conversion_ = crate::path::conversion_(vc_transcode_path);
                quote!(.with_conversion(#conversion_::new::<#converter>()))
            }
            None => crate::utils::empty(),
        };

        quote!(#with_flags #without_writable #with_conversion)
    }

    /// Generate the `TypeInfo` expression.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// _path_::TypeInfo::Composite(
    ///     _path_::CompositeInfo::new::<Self>([
    ///         _path_::MemberInfo::field::<T>("name")
    ///             .with_flags(...)
    ///             .with_conversion(...),
    ///         _path_::MemberInfo::property::<T>("name", true),
    ///     ])
    ///     .with_default(...)
    ///     .with_conversion(...)
    /// )
    /// ```
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_transcode_path = self.meta.vc_transcode_path();
        let type_info_ = crate::path::type_info_(vc_transcode_path);
        let composite_info_ = crate::path::composite_info_(vc_transcode_path);
        let member_info_ = crate::path::member_info_(vc_transcode_path);
        let transcode_ = crate::path::transcode_(vc_transcode_path);
        let box_ = crate::path::box_(vc_transcode_path);
        let default_ = crate::path::default_();

        let fields = self.fields.iter().map(|field| {
            let ty = field.ty;
            let name = &field.name;
            let modifiers = self.member_modifiers(&field.attrs);
            quote! {
                #member_info_::field::<#ty>(#name) #modifiers
            }
        });

        let properties = self.properties().map(|(_, property)| {
            let ty = &property.ty;
            let name = &property.name;
            let writable = property.set.is_some();
            let modifiers = self.member_modifiers(&property.attrs);
            quote! {
                #member_info_::property::<#ty>(#name, #writable) #modifiers
            }
        });

        let with_default = if self.meta.attrs().no_default.is_some() {
            crate::utils::empty()
        } else {
            quote! {
                .with_default(|| -> #box_<dyn #transcode_> {
                    #box_::new(<Self as #default_>::default())
                })
            }
        };

        let with_conversion = self.meta.with_conversion_expression();

        // An empty array literal does not infer its element type.
        let members = if self.member_count() == 0 {
            quote!(#box_::<[#member_info_]>::default())
        } else {
            quote!([ #(#fields,)* #(#properties,)* ])
        };

        quote! {
            #type_info_::Composite(
                #composite_info_::new::<Self>(#members)
                    #with_default
                    #with_conversion
            )
        }
    }
}
