use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use crate::field_attributes::FieldAttributes;
use crate::path;
use crate::utils::with_bounds;

struct RecordField<'a> {
    field: &'a syn::Field,
    ident: &'a syn::Ident,
    attrs: FieldAttributes,
}

pub(crate) fn impl_record(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Record` needs named fields, tuple structs are not supported",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`Record` can only be derived for structs",
            ));
        }
    };

    let fields = fields
        .into_iter()
        .map(|field| {
            Ok(RecordField {
                field,
                ident: field.ident.as_ref().ok_or_else(|| syn::Error::new(field.span(), "unnamed field"))?,
                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let mut bases = fields.iter().filter(|f| f.attrs.base.is_some());
    let base = bases.next();
    if let Some(extra) = bases.next() {
        return Err(syn::Error::new(extra.field.span(), "a record can have only one `base` field"));
    }

    let mut names = BTreeMap::new();
    for f in fields.iter().filter(|f| f.attrs.base.is_none()) {
        let name = field_name(f);
        if let Some(first) = names.insert(name.clone(), f.ident) {
            return Err(syn::Error::new(
                f.field.span(),
                format!("field name `{name}` is already used by `{first}`"),
            ));
        }
    }

    let rfl_reflect_path = path::rfl_reflect();
    let exports = path::exports_(&rfl_reflect_path);
    let info = path::info_(&rfl_reflect_path);

    let builder_calls = base
        .map(|f| base_tokens(f, &exports))
        .into_iter()
        .chain(
            fields
                .iter()
                .filter(|f| f.attrs.base.is_none())
                .map(|f| field_tokens(f, &exports, &info)),
        )
        .collect::<Vec<_>>();

    let bounded = fields.iter().map(|f| {
        let bound = if f.attrs.base.is_some() {
            quote!(#exports::Record)
        } else {
            quote!(#exports::Codec)
        };
        (&f.field.ty, bound)
    });
    let generics = with_bounds(&ast.generics, bounded);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &ast.ident;

    let cell = if ast.generics.params.is_empty() {
        quote! {
            static CELL: #exports::NonGenericRegistryCell<#ident> = #exports::NonGenericRegistryCell::new();
            CELL.get_or_init(|| {
                #exports::Registry::<Self>::builder()
                    #(#builder_calls)*
                    .build()
            })
        }
    } else {
        quote! {
            static CELL: #exports::GenericRegistryCell = #exports::GenericRegistryCell::new();
            CELL.get_or_insert::<Self>(|| {
                #exports::Registry::<Self>::builder()
                    #(#builder_calls)*
                    .build()
            })
        }
    };

    Ok(quote! {
        impl #impl_generics #exports::Codec for #ident #ty_generics #where_clause {
            const SHAPE: #exports::Shape = #exports::Shape::Record;

            #[inline]
            fn encode(&self) -> #exports::Tree {
                #exports::encode_record(self)
            }

            #[inline]
            fn decode(&mut self, tree: &#exports::Tree) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::decode_record(self, tree)
            }

            #[inline]
            fn decode_with(
                &mut self,
                tree: &#exports::Tree,
                loader: &#exports::TreeLoader,
            ) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::decode_record_with(self, tree, loader)
            }

            #[inline]
            fn parse_text(&mut self, text: &str) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::parse_record_text(self, text)
            }

            #[inline]
            fn assign_path(&mut self, path: &str, text: &str) -> ::core::result::Result<(), #exports::DecodeError> {
                #exports::assign_record_path(self, path, text)
            }
        }

        impl #impl_generics #exports::Record for #ident #ty_generics #where_clause {
            fn registry() -> &'static #exports::Registry<Self> {
                #cell
            }
        }
    })
}

fn field_name(f: &RecordField) -> String {
    match &f.attrs.rename {
        Some(name) => name.value(),
        None => f.ident.to_string(),
    }
}

fn base_tokens(f: &RecordField, exports: &TokenStream) -> TokenStream {
    let ident = f.ident;
    let ty = &f.field.ty;
    quote_spanned! {ty.span()=>
        .inherit(
            <#ty as #exports::Record>::registry(),
            |record: &Self| &record.#ident,
            |record: &mut Self| &mut record.#ident,
        )
    }
}

fn field_tokens(f: &RecordField, exports: &TokenStream, info: &TokenStream) -> TokenStream {
    let ident = f.ident;
    let ty = &f.field.ty;
    let name = field_name(f);

    let mut attributes = Vec::new();
    if f.attrs.required {
        attributes.push(quote!(#info::Required));
    }
    if f.attrs.ignore {
        attributes.push(quote!(#info::Ignore));
    }
    if f.attrs.skip_flat {
        attributes.push(quote!(#info::SkipFlat));
    }
    attributes.extend(f.attrs.custom.iter().map(|expr| quote!(#expr)));

    if attributes.is_empty() {
        return quote! {
            .field::<#ty>(
                #name,
                |record: &Self| &record.#ident,
                |record: &mut Self| &mut record.#ident,
            )
        };
    }

    let capacity = attributes.len();
    quote! {
        .field_with::<#ty>(
            #name,
            |record: &Self| &record.#ident,
            |record: &mut Self| &mut record.#ident,
            #exports::Attributes::with_capacity(#capacity)
                #(.with_attribute(#attributes))*,
        )
    }
}
