//! Paths into `rfl_reflect` used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Returns the path under which the invoking crate reaches `rfl_reflect`.
///
/// Resolved from the invoking crate's Cargo.toml, see
/// `rfl_macro_utils::Manifest`. The lookup reads files and takes a lock, so
/// call it once per macro invocation.
pub(crate) fn rfl_reflect() -> syn::Path {
    rfl_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("rfl_reflect"))
}

#[inline(always)]
pub(crate) fn exports_(rfl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #rfl_reflect_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn info_(rfl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #rfl_reflect_path::info
    }
}
