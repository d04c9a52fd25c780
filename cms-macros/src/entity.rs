use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Field, Item, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[entity] 宏实现
/// - 补齐 `id: IdType`、`version: usize` 并置于字段最前
/// - 指定 `aggregate_root = "..."` 时在末尾补齐 `#[serde(skip)] uncommitted_events`
/// - 合并派生：Debug（可关闭）、Clone、Default、Serialize、Deserialize
/// - 实现 `Entity`，聚合根额外实现 `AggregateRoot`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });

    let leading: Vec<Field> = vec![
        syn::parse_quote! { id: #id_type },
        syn::parse_quote! { version: usize },
    ];
    let trailing: Vec<Field> = match &cfg.aggregate_root {
        Some(_) => vec![syn::parse_quote! {
            #[serde(skip)]
            uncommitted_events: ::cms_domain::aggregate_root::UncommittedEvents
        }],
        None => Vec::new(),
    };
    ensure_fields(fields_named, &leading, &trailing);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let aggregate_root_impl = cfg.aggregate_root.as_ref().map(|type_name| {
        quote! {
            impl #impl_generics ::cms_domain::aggregate_root::AggregateRoot for #ident #ty_generics #where_clause {
                const TYPE: &'static str = #type_name;

                fn uncommitted_events(&self) -> &::cms_domain::aggregate_root::UncommittedEvents {
                    &self.uncommitted_events
                }

                fn uncommitted_events_mut(&mut self) -> &mut ::cms_domain::aggregate_root::UncommittedEvents {
                    &mut self.uncommitted_events
                }
            }
        }
    });

    let expanded = quote! {
        #st

        impl #impl_generics ::cms_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn new(aggregate_id: Self::Id, version: usize) -> Self {
                Self { id: aggregate_id, version, ..Default::default() }
            }

            fn id(&self) -> &Self::Id { &self.id }

            fn version(&self) -> usize { self.version }
        }

        #aggregate_root_impl
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    id_ty: Option<Type>,
    aggregate_root: Option<LitStr>,
    derive_debug: Option<bool>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            id_ty: None,
            aggregate_root: None,
            derive_debug: None,
        };

        if input.is_empty() {
            return Ok(cfg);
        }

        let elems = Punctuated::<EntityAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems {
            match elem {
                EntityAttrElem::Id(key, ty) => {
                    if cfg.id_ty.replace(*ty).is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate key 'id' in attribute"));
                    }
                }
                EntityAttrElem::AggregateRoot(key, lit) => {
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "'aggregate_root' must not be empty"));
                    }
                    if cfg.aggregate_root.replace(lit).is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "duplicate key 'aggregate_root' in attribute",
                        ));
                    }
                }
                EntityAttrElem::Debug(key, b) => {
                    if cfg.derive_debug.replace(b).is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                }
            }
        }

        Ok(cfg)
    }
}

enum EntityAttrElem {
    Id(syn::Ident, Box<Type>),
    AggregateRoot(syn::Ident, LitStr),
    Debug(syn::Ident, bool),
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;

        if key == "id" {
            let ty: Type = input.parse()?;
            Ok(EntityAttrElem::Id(key, Box::new(ty)))
        } else if key == "aggregate_root" {
            let lit: LitStr = input.parse()?;
            Ok(EntityAttrElem::AggregateRoot(key, lit))
        } else if key == "debug" {
            let lit: syn::LitBool = input.parse()?;
            Ok(EntityAttrElem::Debug(key, lit.value()))
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'id', 'aggregate_root' or 'debug'",
            ))
        }
    }
}
