use minicore_api::prelude::{Action, ActionId, DataAction, QueryResult, guard};

use crate::dbms::statement::StatementBuilder;

/// Builds `DELETE FROM {table}` followed by the data properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    table: String,
}

impl DeleteAction {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Action for DeleteAction {
    fn id(&self) -> ActionId {
        ActionId::Delete
    }

    /// Guards against mass deletion: at least one property is required.
    ///
    /// Any clause kind satisfies the guard, a lone `LIMIT` included.
    fn validate(&self, data: &DataAction) -> bool {
        !data.properties().is_empty()
    }

    fn build(&self, data: &DataAction) -> QueryResult<String> {
        guard::identifier(&self.table)?;

        Ok(StatementBuilder::new(format!("DELETE FROM {}", self.table))
            .properties(data.properties())?
            .build())
    }
}
