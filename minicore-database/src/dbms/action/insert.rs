use minicore_api::prelude::{Action, ActionId, DataAction, QueryResult, guard};

use crate::dbms::statement::{StatementBuilder, column_list};

/// Builds `INSERT INTO {table} (c1, c2) VALUES (:c1, :c2)`.
///
/// Every column is bound to the placeholder of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertAction {
    table: String,
}

impl InsertAction {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Action for InsertAction {
    fn id(&self) -> ActionId {
        ActionId::Insert
    }

    fn validate(&self, data: &DataAction) -> bool {
        !data.columns().is_empty()
    }

    fn build(&self, data: &DataAction) -> QueryResult<String> {
        guard::identifier(&self.table)?;
        let columns = column_list(data.columns(), guard::identifier)?;
        let placeholders = data
            .columns()
            .iter()
            .map(|column| format!(":{column}"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(StatementBuilder::new(format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            self.table
        ))
        .properties(data.properties())?
        .build())
    }
}
