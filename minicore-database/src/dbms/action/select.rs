use minicore_api::prelude::{Action, ActionId, DataAction, QueryResult, guard};

use crate::dbms::statement::{StatementBuilder, column_list};

/// Builds `SELECT c1, c2 FROM {table}` followed by the data properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAction {
    table: String,
}

impl SelectAction {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Action for SelectAction {
    fn id(&self) -> ActionId {
        ActionId::Select
    }

    fn validate(&self, data: &DataAction) -> bool {
        !data.columns().is_empty()
    }

    fn build(&self, data: &DataAction) -> QueryResult<String> {
        guard::identifier(&self.table)?;
        let columns = column_list(data.columns(), guard::selected_column)?;

        Ok(
            StatementBuilder::new(format!("SELECT {columns} FROM {}", self.table))
                .properties(data.properties())?
                .build(),
        )
    }
}

#[cfg(test)]
mod tests {

    use minicore_api::prelude::{ClauseKind, QueryError};

    use super::*;

    #[test]
    fn test_should_validate_columns_presence() {
        let action = SelectAction::new("users");
        assert!(!action.validate(&DataAction::new()));
        assert!(
            !action.validate(&DataAction::new().with_property(ClauseKind::Where, "id = :id"))
        );
        assert!(action.validate(&DataAction::new().with_column("*")));
    }

    #[test]
    fn test_should_build_select() {
        let mut data = DataAction::new();
        data.add_column("id");
        data.add_property(
            ClauseKind::Where,
            "userId = :userId AND roleId = :roleId",
            [("userId", 1), ("roleId", 2)],
        );
        data.add_property(ClauseKind::Limit, "1", [("unused", 0)]);

        let sql = SelectAction::new("user_roles")
            .build(&data)
            .expect("failed to build");
        assert_eq!(
            sql,
            "SELECT id FROM user_roles WHERE userId = :userId AND roleId = :roleId LIMIT 1"
        );
    }

    #[test]
    fn test_should_allow_qualified_columns() {
        let data = DataAction::new()
            .with_column("users.*")
            .with_column("roles.name")
            .with_property(ClauseKind::InnerJoin, "roles ON roles.id = users.roleId");

        let sql = SelectAction::new("users").build(&data).expect("failed to build");
        assert_eq!(
            sql,
            "SELECT users.*, roles.name FROM users INNER JOIN roles ON roles.id = users.roleId"
        );
    }

    #[test]
    fn test_should_reject_expression_column() {
        let data = DataAction::new().with_column("password FROM secrets --");
        assert!(matches!(
            SelectAction::new("users").build(&data),
            Err(QueryError::InvalidIdentifier(_))
        ));
    }
}
