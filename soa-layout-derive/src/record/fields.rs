use crate::record::record_attrs::RecordAttrs;
use proc_macro2::{Literal, TokenStream};
use quote::{ToTokens, TokenStreamExt, format_ident, quote};
use syn::{Field, Fields, Generics, Ident, Index, Type, Visibility, ext::IdentExt, parse_quote};

pub fn fields_struct(
    ident: Ident,
    vis: Visibility,
    fields: Fields,
    attrs: RecordAttrs,
    generics: Generics,
) -> Result<TokenStream, syn::Error> {
    let RecordAttrs {
        derive_ref,
        derive_ref_mut,
    } = attrs;

    let kind = match &fields {
        Fields::Named(_) => FieldKind::Named,
        Fields::Unnamed(_) => FieldKind::Unnamed,
        Fields::Unit => FieldKind::Unnamed,
    };

    let (vis_all, ty_all, ident_all): (Vec<_>, Vec<_>, Vec<_>) = fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let Field { vis, ident, ty, .. } = field;
            let ident: FieldIdent = (i, ident).into();
            (vis, ty, ident)
        })
        .collect();

    let (ident_head, ident_tail) = match ident_all.split_first() {
        Some((head, tail)) => (head, tail),
        None => {
            return Err(syn::Error::new_spanned(
                ident,
                "Record requires at least one field",
            ));
        }
    };

    let pos_all: Vec<_> = (0..ident_all.len()).map(Literal::usize_unsuffixed).collect();
    let binding_all: Vec<_> = (0..ident_all.len())
        .map(|i| format_ident!("field_{i}"))
        .collect();
    let getter_all: Vec<_> = ident_all.iter().map(FieldIdent::getter).collect();
    let getter_mut_all: Vec<_> = ident_all
        .iter()
        .map(|ident| format_ident!("{}_mut", ident.stem()))
        .collect();
    let setter_all: Vec<_> = ident_all
        .iter()
        .map(|ident| format_ident!("set_{}", ident.stem()))
        .collect();

    let columns = format_ident!("{ident}Columns");
    let item_ref = format_ident!("{ident}Ref");
    let item_ref_mut = format_ident!("{ident}RefMut");
    let iter = format_ident!("{ident}Iter");
    let iter_mut = format_ident!("{ident}IterMut");
    let fields_trait = format_ident!("{ident}Fields");

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let where_predicates: Vec<_> = generics
        .where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter())
        .collect();

    let mut view_generics = generics.clone();
    view_generics.params.insert(0, parse_quote!('soa));
    let (view_impl_generics, view_ty_generics, _) = view_generics.split_for_impl();

    let mut columns_generics = generics.clone();
    columns_generics
        .params
        .push(parse_quote!(SoaSeq: ::soa_layout::SequenceFamily));
    let (columns_impl_generics, columns_ty_generics, _) = columns_generics.split_for_impl();

    let define = |type_mapper: &dyn Fn(&Type) -> TokenStream| {
        let ty_mapped = ty_all.iter().map(type_mapper);
        match kind {
            FieldKind::Named => quote! {
                #where_clause { #(#vis_all #ident_all: #ty_mapped),* }
            },
            FieldKind::Unnamed => quote! {
                ( #(#vis_all #ty_mapped),* ) #where_clause;
            },
        }
    };

    let mut out = TokenStream::new();

    let columns_def = define(&|ty| quote! { <SoaSeq as ::soa_layout::SequenceFamily>::Seq<#ty> });
    let columns_debug = match kind {
        FieldKind::Named => {
            let name_all = ident_all.iter().map(ToString::to_string);
            quote! {
                f.debug_struct(::core::stringify!(#columns))
                    #(.field(#name_all, &self.#ident_all))*
                    .finish()
            }
        }
        FieldKind::Unnamed => quote! {
            f.debug_tuple(::core::stringify!(#columns))
                #(.field(&self.#ident_all))*
                .finish()
        },
    };
    out.append_all(quote! {
        #[allow(dead_code)]
        #vis struct #columns #columns_impl_generics #columns_def

        #[automatically_derived]
        impl #columns_impl_generics ::core::default::Default for #columns #columns_ty_generics
        #where_clause
        {
            fn default() -> Self {
                Self {
                    #(
                    #ident_all: ::core::default::Default::default(),
                    )*
                }
            }
        }

        #[automatically_derived]
        impl #columns_impl_generics ::core::clone::Clone for #columns #columns_ty_generics
        where
            #(#where_predicates,)*
            #(<SoaSeq as ::soa_layout::SequenceFamily>::Seq<#ty_all>: ::core::clone::Clone,)*
        {
            fn clone(&self) -> Self {
                Self {
                    #(
                    #ident_all: ::core::clone::Clone::clone(&self.#ident_all),
                    )*
                }
            }
        }

        #[automatically_derived]
        impl #columns_impl_generics ::core::fmt::Debug for #columns #columns_ty_generics
        where
            #(#where_predicates,)*
            #(<SoaSeq as ::soa_layout::SequenceFamily>::Seq<#ty_all>: ::core::fmt::Debug,)*
        {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #columns_debug
            }
        }
    });

    let item_ref_def = define(&|ty| quote! { &'soa #ty });
    out.append_all(quote! {
        #derive_ref
        #[allow(dead_code)]
        #vis struct #item_ref #view_impl_generics #item_ref_def

        // Derive would impose unnecessary Copy restrictions on generic params
        #[automatically_derived]
        impl #view_impl_generics ::core::clone::Clone for #item_ref #view_ty_generics #where_clause {
            fn clone(&self) -> Self {
                *self
            }
        }

        #[automatically_derived]
        impl #view_impl_generics ::core::marker::Copy for #item_ref #view_ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics ::soa_layout::AsRecordRef for #item_ref #view_ty_generics #where_clause {
            type Item = #ident #ty_generics;

            fn as_record_ref(&self) -> <Self::Item as ::soa_layout::Record>::Ref<'_> {
                *self
            }
        }
    });

    let item_ref_mut_def = define(&|ty| quote! { ::soa_layout::FieldRef<'soa, #ty> });
    out.append_all(quote! {
        #derive_ref_mut
        #[allow(dead_code)]
        #vis struct #item_ref_mut #view_impl_generics #item_ref_mut_def

        #[automatically_derived]
        impl #view_impl_generics ::soa_layout::AsRecordRef for #item_ref_mut #view_ty_generics #where_clause {
            type Item = #ident #ty_generics;

            fn as_record_ref(&self) -> <Self::Item as ::soa_layout::Record>::Ref<'_> {
                #item_ref {
                    #(
                    #ident_all: ::core::ops::Deref::deref(&self.#ident_all),
                    )*
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics ::soa_layout::AsRecordRef for #ident #ty_generics #where_clause {
            type Item = Self;

            fn as_record_ref(&self) -> <Self::Item as ::soa_layout::Record>::Ref<'_> {
                #item_ref {
                    #(
                    #ident_all: &self.#ident_all,
                    )*
                }
            }
        }
    });

    let iter_def = define(&|ty| quote! { ::core::slice::Iter<'soa, #ty> });
    let iter_mut_def = define(&|ty| quote! { ::core::slice::IterMut<'soa, #ty> });
    out.append_all(quote! {
        #[allow(dead_code)]
        #vis struct #iter #view_impl_generics #iter_def

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::Iterator for #iter #view_ty_generics #where_clause {
            type Item = #item_ref #view_ty_generics;

            #[inline]
            fn next(&mut self) -> ::core::option::Option<Self::Item> {
                ::core::option::Option::Some(#item_ref {
                    #(
                    #ident_all: self.#ident_all.next()?,
                    )*
                })
            }

            #[inline]
            fn size_hint(&self) -> (usize, ::core::option::Option<usize>) {
                self.#ident_head.size_hint()
            }

            #[inline]
            fn nth(&mut self, n: usize) -> ::core::option::Option<Self::Item> {
                ::core::option::Option::Some(#item_ref {
                    #(
                    #ident_all: self.#ident_all.nth(n)?,
                    )*
                })
            }
        }

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::DoubleEndedIterator for #iter #view_ty_generics #where_clause {
            #[inline]
            fn next_back(&mut self) -> ::core::option::Option<Self::Item> {
                ::core::option::Option::Some(#item_ref {
                    #(
                    #ident_all: self.#ident_all.next_back()?,
                    )*
                })
            }
        }

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::ExactSizeIterator for #iter #view_ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::FusedIterator for #iter #view_ty_generics #where_clause {}

        #[allow(dead_code)]
        #vis struct #iter_mut #view_impl_generics #iter_mut_def

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::Iterator for #iter_mut #view_ty_generics #where_clause {
            type Item = #item_ref_mut #view_ty_generics;

            #[inline]
            fn next(&mut self) -> ::core::option::Option<Self::Item> {
                ::core::option::Option::Some(#item_ref_mut {
                    #(
                    #ident_all: ::soa_layout::FieldRef::new(self.#ident_all.next()?),
                    )*
                })
            }

            #[inline]
            fn size_hint(&self) -> (usize, ::core::option::Option<usize>) {
                self.#ident_head.size_hint()
            }

            #[inline]
            fn nth(&mut self, n: usize) -> ::core::option::Option<Self::Item> {
                ::core::option::Option::Some(#item_ref_mut {
                    #(
                    #ident_all: ::soa_layout::FieldRef::new(self.#ident_all.nth(n)?),
                    )*
                })
            }
        }

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::DoubleEndedIterator for #iter_mut #view_ty_generics #where_clause {
            #[inline]
            fn next_back(&mut self) -> ::core::option::Option<Self::Item> {
                ::core::option::Option::Some(#item_ref_mut {
                    #(
                    #ident_all: ::soa_layout::FieldRef::new(self.#ident_all.next_back()?),
                    )*
                })
            }
        }

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::ExactSizeIterator for #iter_mut #view_ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics ::core::iter::FusedIterator for #iter_mut #view_ty_generics #where_clause {}
    });

    out.append_all(quote! {
        #[automatically_derived]
        impl #impl_generics ::soa_layout::Record for #ident #ty_generics #where_clause {
            type Columns<SoaSeq: ::soa_layout::SequenceFamily> = #columns #columns_ty_generics;
            type Ref<'soa> = #item_ref #view_ty_generics where Self: 'soa;
            type RefMut<'soa> = #item_ref_mut #view_ty_generics where Self: 'soa;
            type Iter<'soa> = #iter #view_ty_generics where Self: 'soa;
            type IterMut<'soa> = #iter_mut #view_ty_generics where Self: 'soa;

            #[inline]
            fn columns_len<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &Self::Columns<SoaSeq>,
            ) -> usize {
                let len = columns.#ident_head.len();
                #(
                ::core::debug_assert_eq!(
                    columns.#ident_tail.len(),
                    len,
                    "columns have diverged in length",
                );
                )*
                len
            }

            #[inline]
            fn columns_get<'soa, SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &'soa Self::Columns<SoaSeq>,
                index: usize,
            ) -> ::core::option::Option<Self::Ref<'soa>>
            where
                Self: 'soa,
            {
                ::core::option::Option::Some(#item_ref {
                    #(
                    #ident_all: columns.#ident_all.get(index)?,
                    )*
                })
            }

            #[inline]
            fn columns_get_mut<'soa, SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &'soa mut Self::Columns<SoaSeq>,
                index: usize,
            ) -> ::core::option::Option<Self::RefMut<'soa>>
            where
                Self: 'soa,
            {
                ::core::option::Option::Some(#item_ref_mut {
                    #(
                    #ident_all: ::soa_layout::FieldRef::new(columns.#ident_all.get_mut(index)?),
                    )*
                })
            }

            fn columns_push<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &mut Self::Columns<SoaSeq>,
                record: Self,
            ) {
                let Self { #(#ident_all: #binding_all),* } = record;
                #(
                ::soa_layout::Sequence::reserve(&mut columns.#ident_all, 1);
                )*
                #(
                ::soa_layout::Sequence::push(&mut columns.#ident_all, #binding_all);
                )*
            }

            fn columns_pop<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &mut Self::Columns<SoaSeq>,
            ) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(Self {
                    #(
                    #ident_all: ::soa_layout::Sequence::pop(&mut columns.#ident_all)?,
                    )*
                })
            }

            fn columns_truncate<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &mut Self::Columns<SoaSeq>,
                len: usize,
            ) {
                #(
                ::soa_layout::Sequence::truncate(&mut columns.#ident_all, len);
                )*
            }

            fn columns_reserve<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &mut Self::Columns<SoaSeq>,
                additional: usize,
            ) {
                #(
                ::soa_layout::Sequence::reserve(&mut columns.#ident_all, additional);
                )*
            }

            #[inline]
            fn columns_capacity<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &Self::Columns<SoaSeq>,
            ) -> usize {
                let capacity = ::soa_layout::Sequence::capacity(&columns.#ident_head);
                #(
                let capacity = ::core::cmp::min(
                    capacity,
                    ::soa_layout::Sequence::capacity(&columns.#ident_tail),
                );
                )*
                capacity
            }

            fn columns_shrink_to_fit<SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &mut Self::Columns<SoaSeq>,
            ) {
                #(
                ::soa_layout::Sequence::shrink_to_fit(&mut columns.#ident_all);
                )*
            }

            #[inline]
            fn columns_iter<'soa, SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &'soa Self::Columns<SoaSeq>,
            ) -> Self::Iter<'soa>
            where
                Self: 'soa,
            {
                #iter {
                    #(
                    #ident_all: columns.#ident_all.iter(),
                    )*
                }
            }

            #[inline]
            fn columns_iter_mut<'soa, SoaSeq: ::soa_layout::SequenceFamily>(
                columns: &'soa mut Self::Columns<SoaSeq>,
            ) -> Self::IterMut<'soa>
            where
                Self: 'soa,
            {
                #iter_mut {
                    #(
                    #ident_all: columns.#ident_all.iter_mut(),
                    )*
                }
            }
        }
    });

    for ((pos, field), ty) in pos_all.iter().zip(&ident_all).zip(&ty_all) {
        out.append_all(quote! {
            #[automatically_derived]
            impl #impl_generics ::soa_layout::Slot<#pos> for #ident #ty_generics #where_clause {
                type Value = #ty;

                #[inline]
                fn slot(&self) -> &Self::Value {
                    &self.#field
                }
            }

            #[automatically_derived]
            impl #impl_generics ::soa_layout::SlotMut<#pos> for #ident #ty_generics #where_clause {
                #[inline]
                fn slot_mut(&mut self) -> &mut Self::Value {
                    &mut self.#field
                }
            }

            #[automatically_derived]
            impl #view_impl_generics ::soa_layout::Slot<#pos> for #item_ref #view_ty_generics #where_clause {
                type Value = #ty;

                #[inline]
                fn slot(&self) -> &Self::Value {
                    self.#field
                }
            }

            #[automatically_derived]
            impl #view_impl_generics ::soa_layout::Slot<#pos> for #item_ref_mut #view_ty_generics #where_clause {
                type Value = #ty;

                #[inline]
                fn slot(&self) -> &Self::Value {
                    ::core::ops::Deref::deref(&self.#field)
                }
            }

            #[automatically_derived]
            impl #view_impl_generics ::soa_layout::SlotMut<#pos> for #item_ref_mut #view_ty_generics #where_clause {
                #[inline]
                fn slot_mut(&mut self) -> &mut Self::Value {
                    ::core::ops::DerefMut::deref_mut(&mut self.#field)
                }
            }
        });
    }

    let fields_doc = format!(
        "Named access to the fields of [`{ident}`] and its views, \
        whichever layout they come from."
    );
    out.append_all(quote! {
        #[doc = #fields_doc]
        #vis trait #fields_trait #impl_generics:
            #(::soa_layout::Slot<#pos_all, Value = #ty_all>)+*
        #where_clause
        {
            #(
            #[inline]
            fn #getter_all(&self) -> &#ty_all {
                <Self as ::soa_layout::Slot<#pos_all>>::slot(self)
            }

            #[inline]
            fn #getter_mut_all(&mut self) -> &mut #ty_all
            where
                Self: ::soa_layout::SlotMut<#pos_all>,
            {
                <Self as ::soa_layout::SlotMut<#pos_all>>::slot_mut(self)
            }

            /// Overwrites the field and returns its previous value.
            #[inline]
            fn #setter_all(&mut self, value: #ty_all) -> #ty_all
            where
                Self: ::soa_layout::SlotMut<#pos_all>,
            {
                ::core::mem::replace(
                    <Self as ::soa_layout::SlotMut<#pos_all>>::slot_mut(self),
                    value,
                )
            }
            )*
        }

        #[automatically_derived]
        impl #impl_generics #fields_trait #ty_generics for #ident #ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics #fields_trait #ty_generics for &'soa #ident #ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics #fields_trait #ty_generics for &'soa mut #ident #ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics #fields_trait #ty_generics for #item_ref #view_ty_generics #where_clause {}

        #[automatically_derived]
        impl #view_impl_generics #fields_trait #ty_generics for #item_ref_mut #view_ty_generics #where_clause {}
    });

    Ok(out)
}

#[derive(Clone)]
enum FieldIdent {
    Named(Ident),
    Unnamed(usize),
}

impl FieldIdent {
    /// The name of the generated getter.
    fn getter(&self) -> Ident {
        match self {
            FieldIdent::Named(ident) => ident.clone(),
            FieldIdent::Unnamed(i) => format_ident!("f{i}"),
        }
    }

    /// The getter name without any `r#` prefix, for building the `_mut` and
    /// `set_` variants.
    fn stem(&self) -> String {
        match self {
            FieldIdent::Named(ident) => ident.unraw().to_string(),
            FieldIdent::Unnamed(i) => format!("f{i}"),
        }
    }
}

impl From<(usize, Option<Ident>)> for FieldIdent {
    fn from(value: (usize, Option<Ident>)) -> Self {
        match value {
            (_, Some(ident)) => Self::Named(ident),
            (i, None) => Self::Unnamed(i),
        }
    }
}

impl ToTokens for FieldIdent {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            FieldIdent::Named(ident) => ident.to_tokens(tokens),
            FieldIdent::Unnamed(i) => Index::from(*i).to_tokens(tokens),
        }
    }
}

impl std::fmt::Display for FieldIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldIdent::Named(ident) => write!(f, "{}", ident.unraw()),
            FieldIdent::Unnamed(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum FieldKind {
    Named,
    Unnamed,
}
