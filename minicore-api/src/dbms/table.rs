//! This module contains types related to database tables.

mod column_def;
mod scheme;

use thiserror::Error;

pub use self::column_def::ColumnDef;
pub use self::scheme::{Scheme, TableSchema};

/// The result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// An enum representing possible errors raised while wiring a table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An action with the same id is already registered on the table.
    #[error("Action '{action}' is already registered on table '{table}'")]
    DuplicateAction { table: String, action: String },

    /// The table scheme has no columns.
    #[error("Table '{0}' has an empty scheme")]
    EmptyScheme(String),

    /// The table scheme contains a column that cannot be rendered safely.
    #[error("Invalid scheme for table '{table}': {reason}")]
    InvalidScheme { table: String, reason: String },
}
