use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Path, meta::ParseNestedMeta};

/// A generated view that `#[record_derive(..)]` can target.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum View {
    Ref,
    RefMut,
}

impl View {
    const ALL: [View; 2] = [View::Ref, View::RefMut];

    fn parse(meta: &ParseNestedMeta<'_>) -> Result<Self, syn::Error> {
        if meta.path.is_ident("Ref") {
            Ok(Self::Ref)
        } else if meta.path.is_ident("RefMut") {
            Ok(Self::RefMut)
        } else {
            Err(meta.error("unknown view, expected `Ref` or `RefMut`"))
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Ref => 0,
            Self::RefMut => 1,
        }
    }
}

/// Extra `#[derive(..)]` lists for the generated views.
#[derive(Debug, Clone)]
pub struct RecordAttrs {
    pub derive_ref: TokenStream,
    pub derive_ref_mut: TokenStream,
}

impl RecordAttrs {
    pub fn new(attributes: &[Attribute]) -> Result<Self, syn::Error> {
        let mut per_view: [Vec<Path>; 2] = Default::default();
        for attr in attributes {
            if attr.path().is_ident("record_derive") {
                collect_derives(attr, &mut per_view)?;
            }
        }

        let [derive_ref, derive_ref_mut] = per_view.map(|paths| quote! { #[derive(#(#paths),*)] });
        Ok(Self {
            derive_ref,
            derive_ref_mut,
        })
    }
}

/// Parses one `#[record_derive(Trait, .., include(..), exclude(..))]` and
/// appends its traits to every view it selects. `include` narrows the
/// selection to the listed views, `exclude` removes views from it.
fn collect_derives(attr: &Attribute, per_view: &mut [Vec<Path>; 2]) -> Result<(), syn::Error> {
    let mut traits = vec![];
    let mut selected = [true; 2];
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("include") {
            selected = [false; 2];
            meta.parse_nested_meta(|meta| {
                selected[View::parse(&meta)?.index()] = true;
                Ok(())
            })
        } else if meta.path.is_ident("exclude") {
            meta.parse_nested_meta(|meta| {
                selected[View::parse(&meta)?.index()] = false;
                Ok(())
            })
        } else {
            traits.push(meta.path);
            Ok(())
        }
    })?;

    for view in View::ALL.into_iter().filter(|view| selected[view.index()]) {
        per_view[view.index()].extend(traits.iter().cloned());
    }
    Ok(())
}
