use minicore_api::prelude::{Action, ActionId, DataAction, QueryResult, guard};

use crate::dbms::statement::{StatementBuilder, column_list};

/// Builds `UPDATE {table} SET c1 = :c1, c2 = :c2` followed by the data properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAction {
    table: String,
}

impl UpdateAction {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Action for UpdateAction {
    fn id(&self) -> ActionId {
        ActionId::Update
    }

    /// Requires the columns to set and, as for deletes, at least one property.
    fn validate(&self, data: &DataAction) -> bool {
        !data.columns().is_empty() && !data.properties().is_empty()
    }

    fn build(&self, data: &DataAction) -> QueryResult<String> {
        guard::identifier(&self.table)?;
        column_list(data.columns(), guard::identifier)?;
        let assignments = data
            .columns()
            .iter()
            .map(|column| format!("{column} = :{column}"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(
            StatementBuilder::new(format!("UPDATE {} SET {assignments}", self.table))
                .properties(data.properties())?
                .build(),
        )
    }
}
