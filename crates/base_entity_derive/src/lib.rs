use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::{
    Expr, ExprLit, Fields, Ident, ItemStruct, Lit, LitStr, Meta, Path, Token, parse_macro_input,
    parse_str, punctuated::Punctuated,
};

struct BaseEntityConfig {
    traits_path: Path,
    active_model_ident: Ident,
    id_field: Ident,
    created_at_field: Ident,
    owner_field: Option<Ident>,
    owner_entity: Path,
}

impl Default for BaseEntityConfig {
    fn default() -> Self {
        Self {
            traits_path: parse_str("crate::db::dao::base_traits")
                .expect("default traits path should parse"),
            active_model_ident: Ident::new("ActiveModel", proc_macro2::Span::call_site()),
            id_field: Ident::new("id", proc_macro2::Span::call_site()),
            created_at_field: Ident::new("created_at", proc_macro2::Span::call_site()),
            owner_field: None,
            owner_entity: parse_str("super::user::Entity")
                .expect("default owner entity path should parse"),
        }
    }
}

/// Adds the columns every organizer record carries: an auto-increment `id`
/// and a server-assigned `created_at`. With `owner = "user_id"` it also adds
/// the owning-user foreign key and its cascading `belongs_to` relation.
///
/// Must be placed above `#[sea_orm::model]` so the injected fields are seen by
/// the sea-orm derives.
#[proc_macro_attribute]
pub fn base_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let mut config = BaseEntityConfig::default();
    if let Err(err) = apply_args(&mut config, args) {
        return err.to_compile_error().into();
    }

    let mut input = parse_macro_input!(item as ItemStruct);
    let fields = match &mut input.fields {
        Fields::Named(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                input,
                "base_entity requires a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let existing: HashSet<String> = fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| ident.to_string()))
        .collect();

    let mut new_fields = Punctuated::new();

    if !existing.contains(&config.id_field.to_string()) {
        let id_ident = config.id_field.clone();
        let id_field: syn::Field = syn::parse_quote! {
            #[sea_orm(primary_key)]
            pub #id_ident: i32
        };
        new_fields.push(id_field);
    }

    for field in fields.named.iter().cloned() {
        new_fields.push(field);
    }

    if let Some(owner_ident) = config.owner_field.as_ref() {
        if !existing.contains(&owner_ident.to_string()) {
            let owner_field: syn::Field = syn::parse_quote! {
                #[sea_orm(indexed)]
                pub #owner_ident: i32
            };
            new_fields.push(owner_field);
        }
    }

    if !existing.contains(&config.created_at_field.to_string()) {
        let created_ident = config.created_at_field.clone();
        let created_field: syn::Field = syn::parse_quote! {
            #[sea_orm(default_expr = "Expr::current_timestamp()")]
            pub #created_ident: sea_orm::entity::prelude::DateTimeWithTimeZone
        };
        new_fields.push(created_field);
    }

    if let Some(owner_ident) = config.owner_field.as_ref() {
        let relation_ident = relation_ident_for(owner_ident);
        if !existing.contains(&relation_ident.to_string()) {
            let from = LitStr::new(&owner_ident.to_string(), owner_ident.span());
            let owner_entity = &config.owner_entity;
            let relation_field: syn::Field = syn::parse_quote! {
                #[sea_orm(belongs_to, from = #from, to = "id", on_delete = "Cascade")]
                pub #relation_ident: HasOne<#owner_entity>
            };
            new_fields.push(relation_field);
        }
    }

    fields.named = new_fields;

    let traits_path = config.traits_path;
    let active_model = config.active_model_ident;
    let created_at_field = config.created_at_field;
    let id_column = format_ident!("{}", to_pascal_case(&config.id_field.to_string()));
    let created_at_column =
        format_ident!("{}", to_pascal_case(&created_at_field.to_string()));

    let owner_impl = config.owner_field.as_ref().map(|owner_ident| {
        let owner_column = format_ident!("{}", to_pascal_case(&owner_ident.to_string()));
        quote! {
            impl #traits_path::OwnedEntity for Entity {
                fn owner_column() -> Column {
                    Column::#owner_column
                }
            }
        }
    });

    let expanded = quote! {
        #input

        impl #traits_path::TimestampedActiveModel for #active_model {
            fn set_created_at(
                &mut self,
                ts: sea_orm::entity::prelude::DateTimeWithTimeZone,
            ) {
                self.#created_at_field = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits_path::HasIdColumn for Entity {
            fn id_column() -> Column {
                Column::#id_column
            }
        }

        impl #traits_path::TimestampedEntity for Entity {
            fn created_at_column() -> Column {
                Column::#created_at_column
            }
        }

        #owner_impl
    };

    expanded.into()
}

fn relation_ident_for(owner: &Ident) -> Ident {
    let name = owner.to_string();
    let trimmed = name.strip_suffix("_id").unwrap_or(&name);
    if trimmed == name {
        format_ident!("{}_ref", name)
    } else {
        Ident::new(trimmed, owner.span())
    }
}

fn to_pascal_case(value: &str) -> String {
    value
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn apply_args(
    config: &mut BaseEntityConfig,
    args: Punctuated<Meta, Token![,]>,
) -> Result<(), syn::Error> {
    for meta in args {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value pair, e.g. owner = \"user_id\"",
            ));
        };

        let Some(ident) = name_value.path.get_ident() else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "expected simple identifier for attribute key",
            ));
        };

        let value = match name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => lit_str,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal for attribute value",
                ));
            }
        };

        match ident.to_string().as_str() {
            "traits" => {
                config.traits_path = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid traits path: {err}"))
                })?;
            }
            "active_model" => {
                config.active_model_ident = Ident::new(&value.value(), value.span());
            }
            "id" => {
                config.id_field = Ident::new(&value.value(), value.span());
            }
            "created_at" => {
                config.created_at_field = Ident::new(&value.value(), value.span());
            }
            "owner" => {
                config.owner_field = Some(Ident::new(&value.value(), value.span()));
            }
            "owner_entity" => {
                config.owner_entity = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid owner entity path: {err}"))
                })?;
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "unknown base_entity attribute key",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{relation_ident_for, to_pascal_case};
    use syn::Ident;

    #[test]
    fn pascal_case_joins_snake_segments() {
        assert_eq!(to_pascal_case("user_id"), "UserId");
        assert_eq!(to_pascal_case("id"), "Id");
        assert_eq!(to_pascal_case("created_at"), "CreatedAt");
    }

    #[test]
    fn relation_name_drops_id_suffix() {
        let owner = Ident::new("user_id", proc_macro2::Span::call_site());
        assert_eq!(relation_ident_for(&owner).to_string(), "user");
    }

    #[test]
    fn relation_name_without_id_suffix_gets_ref_suffix() {
        let owner = Ident::new("author", proc_macro2::Span::call_site());
        assert_eq!(relation_ident_for(&owner).to_string(), "author_ref");
    }
}
