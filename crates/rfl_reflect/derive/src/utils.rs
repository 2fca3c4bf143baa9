use proc_macro2::TokenStream;
use syn::{Generics, Type, WhereClause, parse_quote};

/// Copies `generics`, adding `'static` to every type parameter and `bound` to
/// every type in `bounded`.
///
/// Non-generic items are returned unchanged: their field bounds are checked
/// by the generated code itself.
pub(crate) fn with_bounds<'a>(
    generics: &Generics,
    bounded: impl IntoIterator<Item = (&'a Type, TokenStream)>,
) -> Generics {
    let mut generics = generics.clone();

    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }

    let where_clause: &mut WhereClause = generics.make_where_clause();
    for ident in params {
        where_clause.predicates.push(parse_quote!(#ident: 'static));
    }
    for (ty, bound) in bounded {
        where_clause.predicates.push(parse_quote!(#ty: #bound));
    }

    generics
}
