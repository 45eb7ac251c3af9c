use thiserror::Error;

/// MiniCore Error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MiniCoreError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] crate::dbms::gateway::GatewayError),
    #[error("Query error: {0}")]
    Query(#[from] crate::dbms::query::QueryError),
    #[error("Table error: {0}")]
    Table(#[from] crate::dbms::table::TableError),
}

/// MiniCore Result type
pub type MiniCoreResult<T> = Result<T, MiniCoreError>;
