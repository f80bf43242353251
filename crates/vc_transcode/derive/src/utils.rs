use proc_macro2::TokenStream;

/// An empty token stream, for optional builder calls.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}
