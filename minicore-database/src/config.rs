//! This module exposes the JSON configuration of connections and tables.
//!
//! ```json
//! {
//!   "connections": [{ "name": "default", "driver": "mysql" }],
//!   "tables": [
//!     {
//!       "name": "posts",
//!       "scheme": { "id": "INT AUTO_INCREMENT PRIMARY KEY", "title": "VARCHAR(255)" }
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use minicore_api::prelude::{Driver, Gateway, MiniCoreError, Scheme};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dbms::table::{DEFAULT_CONNECTION, Table};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] MiniCoreError),
    #[error("Table '{table}' uses undeclared connection '{connection}'")]
    UnknownConnection { table: String, connection: String },
}

/// Configuration result.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connections and tables of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// A named connection and the driver it speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub name: String,
    pub driver: Driver,
}

/// A table, its scheme and the connection it runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    #[serde(default = "default_connection")]
    pub connection: String,
    pub scheme: Scheme,
}

fn default_connection() -> String {
    DEFAULT_CONNECTION.to_string()
}

impl Config {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check_connections()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        log::debug!("loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds every configured table on `gateway`.
    pub fn build_tables(&self, gateway: Arc<dyn Gateway>) -> ConfigResult<Vec<Table>> {
        self.tables
            .iter()
            .map(|table| {
                log::debug!(
                    "building table '{}' on connection '{}'",
                    table.name,
                    table.connection
                );
                Table::new(&table.name, table.scheme.clone(), gateway.clone())
                    .map(|built| built.with_connection(&table.connection))
                    .map_err(ConfigError::from)
            })
            .collect()
    }

    /// Tables must run on declared connections, when any are declared.
    fn check_connections(&self) -> ConfigResult<()> {
        if self.connections.is_empty() {
            return Ok(());
        }
        for table in &self.tables {
            if !self
                .connections
                .iter()
                .any(|connection| connection.name == table.connection)
            {
                return Err(ConfigError::UnknownConnection {
                    table: table.name.clone(),
                    connection: table.connection.clone(),
                });
            }
        }
        Ok(())
    }
}
