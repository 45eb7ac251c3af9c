//! Re-exports all the most commonly used items from this crate.

pub use minicore_api::prelude::*;

pub use crate::config::{Config, ConfigError, ConfigResult, ConnectionConfig, TableConfig};
pub use crate::dbms::action::{DeleteAction, InsertAction, SelectAction, UpdateAction};
pub use crate::dbms::default_table::{UserRole, UserRolesTable};
pub use crate::dbms::statement::StatementBuilder;
pub use crate::dbms::table::{DEFAULT_CONNECTION, Table};
pub use crate::gateway::{ExecutedStatement, MemoryConnection, RepositoryManager};
