#![crate_name = "minicore_macros"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Macros and derive for minicore-database
//!
//! This crate provides procedural macros to automatically implement traits
//! required by `minicore-database`.
//!
//! ## Provided Derive Macros
//!
//! - `TableSchema`: Automatically implements the `TableSchema` trait for structs.
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod table_schema;
mod utils;

/// Automatically implements the `TableSchema` trait for a struct.
///
/// Every named field becomes a column, in declaration order.
///
/// # Attributes
///
/// - `#[table(name = "...")]` on the struct sets the table name.
///   Defaults to the struct name in `snake_case`.
/// - `#[column(definition = "...")]` on each field sets the raw column definition (required).
/// - `#[column(name = "...")]` overrides the column name, which defaults to the field name.
/// - `#[column(generated)]` marks a column filled by the database (e.g. `AUTO_INCREMENT`);
///   it is left out of `into_parameters` and of inserts.
///
/// # What the macro generates
///
/// Given a struct like:
///
/// ```rust,ignore
/// #[derive(TableSchema)]
/// #[table(name = "user_roles")]
/// struct UserRole {
///     #[column(definition = "INT AUTO_INCREMENT PRIMARY KEY", generated)]
///     id: u32,
///     #[column(name = "userId", definition = "INT NOT NULL")]
///     user_id: u32,
/// }
/// ```
///
/// The macro expands into:
///
/// ```rust,ignore
/// impl TableSchema for UserRole {
///     fn table_name() -> &'static str {
///         "user_roles"
///     }
///
///     fn columns() -> &'static [ColumnDef] {
///         &[
///             ColumnDef { name: "id", definition: "INT AUTO_INCREMENT PRIMARY KEY", generated: true },
///             ColumnDef { name: "userId", definition: "INT NOT NULL", generated: false },
///         ]
///     }
///
///     fn into_parameters(self) -> Parameters {
///         let mut parameters = Parameters::new();
///         parameters.insert(String::from("userId"), Value::from(self.user_id));
///         parameters
///     }
/// }
/// ```
///
/// # Requirements
///
/// - Only works on `struct`s with named fields.
/// - Each non-generated field type must convert into `Value` with `From`.
#[proc_macro_derive(TableSchema, attributes(table, column))]
pub fn derive_table_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    self::table_schema::table_schema(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
