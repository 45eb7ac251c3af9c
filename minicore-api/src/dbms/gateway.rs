use thiserror::Error;

use crate::dbms::action::Driver;
use crate::dbms::data_action::Parameters;
use crate::dbms::query::QueryOutcome;

/// The result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// An enum representing possible errors raised by a gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No connection is registered under the given name.
    #[error("Unknown connection: '{0}'")]
    UnknownConnection(String),

    /// The underlying driver rejected the statement.
    #[error("Driver error: {0}")]
    Driver(String),

    /// The connection state was poisoned by a panic in another caller.
    #[error("Connection '{0}' is poisoned")]
    Poisoned(String),
}

/// The database gateway: runs a raw SQL string with bound parameters on a named connection.
///
/// This is the seam towards the actual database. It is shared between tables and
/// must serialize or pool access to its connections itself.
pub trait Gateway: Send + Sync {
    /// Executes `sql` with `parameters` on the connection named `connection`.
    ///
    /// # Returns
    ///
    /// [`QueryOutcome::Rows`] for select-type statements, [`QueryOutcome::Affected`] otherwise.
    fn execute(
        &self,
        connection: &str,
        sql: &str,
        parameters: &Parameters,
    ) -> GatewayResult<QueryOutcome>;

    /// Returns the driver behind `connection`, when known.
    fn driver(&self, _connection: &str) -> Option<Driver> {
        None
    }
}

/// A single database connection behind a gateway.
pub trait Connection: Send + Sync {
    /// Returns the driver of the connection.
    fn driver(&self) -> Driver;

    /// Executes `sql` with `parameters`.
    fn query(&self, sql: &str, parameters: &Parameters) -> GatewayResult<QueryOutcome>;
}
