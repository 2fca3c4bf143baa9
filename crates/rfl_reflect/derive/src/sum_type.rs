use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::path;
use crate::utils::with_bounds;

pub(crate) fn impl_sum_type(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`SumType` can only be derived for enums",
        ));
    };

    let rfl_reflect_path = path::rfl_reflect();
    let exports = path::exports_(&rfl_reflect_path);

    let count = data.variants.len();
    let mut index_arms = Vec::with_capacity(count);
    let mut encode_arms = Vec::with_capacity(count);
    let mut decode_arms = Vec::with_capacity(count);
    let mut payloads = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        let ident = &variant.ident;
        match &variant.fields {
            Fields::Unit => {
                index_arms.push(quote!(Self::#ident => #index));
                encode_arms.push(quote!(Self::#ident => #exports::Tree::Null));
                decode_arms.push(quote!(#index => ::core::result::Result::Ok(Self::#ident)));
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let ty = &fields.unnamed[0].ty;
                payloads.push(ty);
                index_arms.push(quote!(Self::#ident(_) => #index));
                encode_arms.push(quote!(Self::#ident(ref value) => #exports::Codec::encode(value)));
                decode_arms.push(quote! {
                    #index => {
                        let mut value = <#ty as ::core::default::Default>::default();
                        #exports::Codec::decode(&mut value, payload)?;
                        ::core::result::Result::Ok(Self::#ident(value))
                    }
                });
            }
            _ => {
                return Err(syn::Error::new(
                    ident.span(),
                    "`SumType` variants must be units or hold exactly one unnamed value",
                ));
            }
        }
    }

    let bound = quote!(#exports::Codec + ::core::default::Default);
    let generics = with_bounds(&ast.generics, payloads.iter().map(|ty| (*ty, bound.clone())));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &ast.ident;

    Ok(quote! {
        impl #impl_generics #exports::SumType for #ident #ty_generics #where_clause {
            const ALTERNATIVES: usize = #count;

            fn index(&self) -> usize {
                match *self {
                    #(#index_arms,)*
                }
            }

            fn encode_payload(&self) -> #exports::Tree {
                match *self {
                    #(#encode_arms,)*
                }
            }

            // Unit alternatives ignore their payload.
            fn decode_alternative(
                index: usize,
                payload: &#exports::Tree,
            ) -> ::core::result::Result<Self, #exports::DecodeError> {
                let _ = payload;
                match index {
                    #(#decode_arms,)*
                    _ => ::core::result::Result::Err(#exports::DecodeError::IndexOutOfRange {
                        index: index as u64,
                        count: #count,
                    }),
                }
            }
        }

        impl #impl_generics #exports::Codec for #ident #ty_generics #where_clause {
            const SHAPE: #exports::Shape = #exports::Shape::Sum;

            #[inline]
            fn encode(&self) -> #exports::Tree {
                #exports::sum::encode(self)
            }

            #[inline]
            fn decode(&mut self, tree: &#exports::Tree) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::sum::decode(self, tree)
            }
        }
    })
}
