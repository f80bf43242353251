//! Provides [`Transcode`], the derive macro of `vc_transcode`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Transcode Derivation
///
/// `#[derive(Transcode)]` implements the following traits:
///
/// - `Typed`
/// - `Transcode`
/// - `Composite` (for structs of any form)
/// - `Atomic` and `FromAtomic` (for fieldless enums)
///
/// Structs become composites whose members are the fields, in declaration
/// order. Tuple fields are named by position (`"0"`, `"1"`, ...). Every field
/// type must implement `Transcode`, including ignored fields: they are still
/// declared, only left out of member enumeration.
///
/// Fieldless enums become atomic values, matched by variant name.
///
/// Generic types are supported. The generated implementations are bounded by:
///
/// - `Transcode + Typed` on every member type;
/// - `Send + Sync + 'static` on every type parameter;
/// - `Default` on the type itself, unless `no_default` is declared.
///
/// Lifetime parameters are not supported.
///
/// ## Member Attributes
///
/// ```rust, ignore
/// #[derive(Transcode, Default)]
/// struct Account {
///     id: u64,
///     #[transcode(ignore)]
///     cache: Vec<u8>,
///     #[transcode(readonly)]
///     created: String,
///     #[transcode(rename = "display_name")]
///     name: String,
///     #[transcode(converter = CentsAsDecimal)]
///     balance: i64,
///     #[deprecated]
///     legacy_flag: bool,
/// }
/// ```
///
/// - `ignore`: excluded from member enumeration.
/// - `include`: always enumerated, overriding `ignore`, obsolescence,
///   read-only fields and event-handler types.
/// - `readonly`: the field is read but never assigned.
/// - `obsolete` or `#[deprecated]`: excluded from member enumeration.
/// - `converter = C`: `C: Converter + Default` replaces the member's
///   representation. On an `Option<T>` field the converter may target `T`.
/// - `rename = "name"`: the member name used in the dynamic representation.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Transcode)]
/// #[transcode(converter = RgbAsHex, no_default)]
/// #[transcode(property(name = "luma", ty = f32, get = Self::luma))]
/// #[transcode(property(name = "hex", ty = String, get = Self::hex, set = Self::set_hex))]
/// struct Rgb(u8, u8, u8);
/// ```
///
/// - `converter = C`: a type-level conversion, `C::Original` must be `Self`.
/// - `no_default`: by default `Default::default` is registered as the
///   constructor used by the reverse transcoder; this opts out, for types
///   that do not implement `Default`.
/// - `property(name = "..", ty = T, get = getter, set = setter)`: a member
///   backed by accessors, listed after the fields. The getter is called as
///   `getter(&self) -> T`, the optional setter as `setter(&mut self, T)`.
///   A property without setter is read-only, and left out of member
///   enumeration unless marked `include`. The member markers `ignore`,
///   `include`, `obsolete` and `converter = C` go in the same list, e.g.
///   `property(name = "area", ty = u32, get = Self::area, include)`.
///
/// Enums accept the type-level `converter`, and `rename` on variants.
#[proc_macro_derive(Transcode, attributes(transcode))]
pub fn derive_transcode(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_transcode_impls(ast)
}
