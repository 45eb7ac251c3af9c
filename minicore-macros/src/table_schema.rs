use proc_macro2::TokenStream as TokenStream2;
use syn::{Attribute, DeriveInput, Field, Fields, LitStr};

use crate::utils;

/// A column parsed from a struct field and its `#[column(...)]` attribute.
struct Column<'a> {
    field: &'a Field,
    name: String,
    definition: LitStr,
    generated: bool,
}

/// Generate implementation of `TableSchema` trait.
pub fn table_schema(
    DeriveInput {
        ident,
        data,
        generics,
        attrs,
        ..
    }: DeriveInput,
) -> syn::Result<TokenStream2> {
    let syn::Data::Struct(struct_data) = data else {
        return Err(syn::Error::new(
            ident.span(),
            format!("Cannot derive TableSchema for {ident}; it can only be derived for structs"),
        ));
    };
    let Fields::Named(fields) = &struct_data.fields else {
        return Err(syn::Error::new(
            ident.span(),
            format!("Cannot derive TableSchema for {ident}; fields must be named"),
        ));
    };

    let table_name =
        parse_table_name(&attrs)?.unwrap_or_else(|| utils::snake_case(&ident.to_string()));
    let columns = fields
        .named
        .iter()
        .map(parse_column)
        .collect::<syn::Result<Vec<_>>>()?;

    let column_defs = impl_column_defs(&columns);
    let into_parameters = impl_into_parameters(&columns);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote::quote! {
        impl #impl_generics ::minicore_api::prelude::TableSchema for #ident #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }

            fn columns() -> &'static [::minicore_api::prelude::ColumnDef] {
                &[#(#column_defs),*]
            }

            #into_parameters
        }
    })
}

/// Reads `#[table(name = "...")]`.
fn parse_table_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute; expected `name`"))
            }
        })?;
    }
    Ok(name)
}

/// Reads `#[column(definition = "...", name = "...", generated)]` of a field.
fn parse_column(field: &Field) -> syn::Result<Column<'_>> {
    let Some(field_ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "fields must be named"));
    };

    let mut name = None;
    let mut definition = None;
    let mut generated = false;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("column")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("definition") {
                definition = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("generated") {
                generated = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported column attribute; expected `definition`, `name` or `generated`",
                ))
            }
        })?;
    }

    let definition = definition.ok_or_else(|| {
        syn::Error::new_spanned(
            field_ident,
            format!("missing #[column(definition = \"...\")] on field `{field_ident}`"),
        )
    })?;
    let name = name.unwrap_or_else(|| field_ident.to_string().trim_start_matches("r#").to_string());

    Ok(Column {
        field,
        name,
        definition,
        generated,
    })
}

/// Generate the `ColumnDef` literals.
fn impl_column_defs(columns: &[Column<'_>]) -> Vec<TokenStream2> {
    columns
        .iter()
        .map(|column| {
            let name = &column.name;
            let definition = &column.definition;
            let generated = column.generated;
            quote::quote! {
                ::minicore_api::prelude::ColumnDef {
                    name: #name,
                    definition: #definition,
                    generated: #generated,
                }
            }
        })
        .collect()
}

/// Generate implementation of `into_parameters` method.
fn impl_into_parameters(columns: &[Column<'_>]) -> TokenStream2 {
    let inserts = columns
        .iter()
        .filter(|column| !column.generated)
        .map(|column| {
            let name = &column.name;
            let field_name = &column.field.ident;
            quote::quote! {
                parameters.insert(
                    ::std::string::String::from(#name),
                    ::minicore_api::prelude::Value::from(self.#field_name),
                );
            }
        });

    quote::quote! {
        #[allow(unused_mut)]
        fn into_parameters(self) -> ::minicore_api::prelude::Parameters {
            let mut parameters = ::minicore_api::prelude::Parameters::new();
            #(#inserts)*
            parameters
        }
    }
}
