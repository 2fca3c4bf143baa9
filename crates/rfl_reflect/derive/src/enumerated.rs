use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Fields, Ident, Token};

use crate::path;
use crate::utils::with_bounds;

const INTEGER_REPRS: &[&str] = &[
    "u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32", "i64", "isize",
];

/// Finds the integer type in `#[repr(..)]`, if any.
fn find_repr(ast: &DeriveInput) -> Option<Ident> {
    ast.attrs
        .iter()
        .filter(|attr| attr.path().is_ident("repr"))
        // `repr(align(..))` and friends do not parse as a list of idents.
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .find(|item| INTEGER_REPRS.contains(&item.to_string().as_str()))
}

pub(crate) fn impl_enumerated(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`Enumerated` can only be derived for enums",
        ));
    };

    if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        return Err(syn::Error::new(
            variant.ident.span(),
            "`Enumerated` variants cannot carry fields, use `SumType` instead",
        ));
    }

    let repr = match find_repr(ast) {
        Some(repr) => quote!(#repr),
        None => quote!(isize),
    };

    let rfl_reflect_path = path::rfl_reflect();
    let exports = path::exports_(&rfl_reflect_path);

    let variants: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let generics = with_bounds(&ast.generics, []);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &ast.ident;

    Ok(quote! {
        impl #impl_generics #exports::Enumerated for #ident #ty_generics #where_clause {
            type Repr = #repr;

            fn to_repr(&self) -> #repr {
                match *self {
                    #(Self::#variants => Self::#variants as #repr,)*
                }
            }

            fn from_repr(repr: #repr) -> ::core::option::Option<Self> {
                #(
                    if repr == Self::#variants as #repr {
                        return ::core::option::Option::Some(Self::#variants);
                    }
                )*
                ::core::option::Option::None
            }
        }

        impl #impl_generics #exports::Codec for #ident #ty_generics #where_clause {
            const SHAPE: #exports::Shape = #exports::Shape::Enum;

            #[inline]
            fn encode(&self) -> #exports::Tree {
                #exports::enumerated::encode(self)
            }

            #[inline]
            fn decode(&mut self, tree: &#exports::Tree) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::enumerated::decode(self, tree)
            }

            #[inline]
            fn parse_text(&mut self, text: &str) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::enumerated::parse_text(self, text)
            }
        }
    })
}
