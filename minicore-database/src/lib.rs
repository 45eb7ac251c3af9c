#![crate_name = "minicore_database"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # MiniCore Database
//!
//! Tables dispatching named actions to SQL statements.
//!
//! A [`prelude::Table`] owns a [`prelude::Scheme`] and a registry of [`prelude::Action`]s.
//! The four default actions build `INSERT`, `SELECT`, `UPDATE` and `DELETE` statements
//! from a [`prelude::DataAction`]: the columns, clause properties and named parameters
//! of one operation. Statements run through a [`prelude::Gateway`], usually a
//! [`prelude::RepositoryManager`] holding named connections.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use minicore_database::prelude::*;
//!
//! let connection = Arc::new(MemoryConnection::new(Driver::Mysql));
//! let gateway = Arc::new(RepositoryManager::new().with_connection("default", connection.clone()));
//!
//! let scheme = Scheme::new()
//!     .column("id", "INT AUTO_INCREMENT PRIMARY KEY")
//!     .column("name", "VARCHAR(255)");
//! let table = Table::new("users", scheme, gateway).unwrap();
//!
//! let data = DataAction::new()
//!     .with_column("name")
//!     .with_parameter("name", "Alice");
//! let dispatch = table.execute("insert", &data).unwrap();
//! assert_eq!(dispatch.outcome(), Some(&QueryOutcome::Affected(1)));
//! assert_eq!(
//!     connection.last_statement().unwrap().sql,
//!     "INSERT INTO users (name) VALUES (:name)"
//! );
//! ```

#![doc(html_playground_url = "https://play.rust-lang.org")]

// makes the crate accessible as `minicore_database` in macros
extern crate self as minicore_database;

pub mod config;
pub mod dbms;
pub mod gateway;
pub mod prelude;
