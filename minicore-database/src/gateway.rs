//! This module exposes the [`RepositoryManager`], a [`Gateway`] routing statements to
//! named [`Connection`]s.

mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use minicore_api::prelude::{
    Connection, Driver, Gateway, GatewayError, GatewayResult, Parameters, QueryOutcome,
};

pub use self::memory::{ExecutedStatement, MemoryConnection};

/// A [`Gateway`] holding a set of named connections.
#[derive(Default)]
pub struct RepositoryManager {
    connections: BTreeMap<String, Arc<dyn Connection>>,
}

impl RepositoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`RepositoryManager::register`].
    pub fn with_connection(mut self, name: impl Into<String>, connection: Arc<dyn Connection>) -> Self {
        self.register(name, connection);
        self
    }

    /// Registers a connection under `name`, returning the connection it replaces, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        connection: Arc<dyn Connection>,
    ) -> Option<Arc<dyn Connection>> {
        let name = name.into();
        log::debug!("registering {} connection '{name}'", connection.driver());
        self.connections.insert(name, connection)
    }

    /// Returns the connection registered under `name`.
    pub fn connection(&self, name: &str) -> GatewayResult<&Arc<dyn Connection>> {
        self.connections
            .get(name)
            .ok_or_else(|| GatewayError::UnknownConnection(name.to_string()))
    }

    /// Returns the names of the registered connections.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.connections.keys().map(String::as_str)
    }
}

impl Gateway for RepositoryManager {
    fn execute(
        &self,
        connection: &str,
        sql: &str,
        parameters: &Parameters,
    ) -> GatewayResult<QueryOutcome> {
        self.connection(connection)?
            .query(sql, parameters)
            .inspect_err(|err| log::error!("[{connection}] {sql}: {err}"))
    }

    fn driver(&self, connection: &str) -> Option<Driver> {
        self.connections.get(connection).map(|conn| conn.driver())
    }
}

impl fmt::Debug for RepositoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.connections
                    .iter()
                    .map(|(name, connection)| (name, connection.driver())),
            )
            .finish()
    }
}
