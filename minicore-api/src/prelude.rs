//! Prelude exposes all the types for `minicore-api` crate.

pub use minicore_macros::TableSchema;

pub use crate::dbms::action::{Action, ActionId, Driver};
pub use crate::dbms::clause::ClauseKind;
pub use crate::dbms::data_action::{DataAction, Parameters, Property};
pub use crate::dbms::gateway::{Connection, Gateway, GatewayError, GatewayResult};
pub use crate::dbms::query::{Dispatch, QueryError, QueryOutcome, QueryResult, Row, guard};
pub use crate::dbms::table::{ColumnDef, Scheme, TableError, TableResult, TableSchema};
pub use crate::dbms::value::Value;
pub use crate::error::{MiniCoreError, MiniCoreResult};
