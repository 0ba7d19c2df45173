mod fields;
mod record_attrs;

use crate::record::{fields::fields_struct, record_attrs::RecordAttrs};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{Data, DeriveInput, GenericParam, parse_macro_input};

pub fn record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = parse_macro_input!(input);
    match expand(input) {
        Ok(tokens) => tokens,
        Err(e) => e.into_compile_error(),
    }
    .into()
}

fn expand(input: DeriveInput) -> Result<TokenStream2, syn::Error> {
    let DeriveInput {
        ident,
        vis,
        data,
        attrs,
        generics,
    } = input;

    if let Some(lifetime) = generics.params.iter().find_map(|param| match param {
        GenericParam::Lifetime(lifetime) => Some(lifetime),
        GenericParam::Type(_) | GenericParam::Const(_) => None,
    }) {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Record does not support lifetime parameters",
        ));
    }

    let attrs = RecordAttrs::new(&attrs)?;
    match data {
        Data::Struct(strukt) => fields_struct(ident, vis, strukt.fields, attrs, generics),
        Data::Enum(_) | Data::Union(_) => Err(syn::Error::new_spanned(
            ident,
            "Record only applies to structs",
        )),
    }
}
