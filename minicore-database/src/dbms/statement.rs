use minicore_api::prelude::{Property, QueryResult, guard};

/// Assembles a statement from its base and the ordered clause fragments of a data action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementBuilder {
    sql: String,
}

impl StatementBuilder {
    /// Starts from the base statement, e.g. `DELETE FROM users`.
    pub fn new(base: impl Into<String>) -> Self {
        Self { sql: base.into() }
    }

    /// Appends each property as `{kind} {condition}`, in order.
    pub fn properties(mut self, properties: &[Property]) -> QueryResult<Self> {
        for property in properties {
            guard::fragment(&property.condition)?;
            self.sql.push(' ');
            self.sql.push_str(property.kind.as_str());
            self.sql.push(' ');
            self.sql.push_str(property.condition.trim());
        }
        Ok(self)
    }

    pub fn build(self) -> String {
        self.sql
    }
}

/// Checks every column with `check` and joins them with `", "`.
pub fn column_list<F>(columns: &[String], check: F) -> QueryResult<String>
where
    F: Fn(&str) -> QueryResult<()>,
{
    columns
        .iter()
        .map(|column| check(column).map(|_| column.as_str()))
        .collect::<QueryResult<Vec<_>>>()
        .map(|columns| columns.join(", "))
}

#[cfg(test)]
mod tests {

    use minicore_api::prelude::{ClauseKind, QueryError};

    use super::*;

    #[test]
    fn test_should_append_properties_in_order() {
        let sql = StatementBuilder::new("SELECT id FROM users")
            .properties(&[
                Property::new(ClauseKind::Where, "name = :name"),
                Property::new(ClauseKind::OrderBy, "id DESC"),
                Property::new(ClauseKind::Limit, " 10 "),
            ])
            .expect("failed to build")
            .build();

        assert_eq!(
            sql,
            "SELECT id FROM users WHERE name = :name ORDER BY id DESC LIMIT 10"
        );
    }

    #[test]
    fn test_should_reject_forbidden_condition() {
        let err = StatementBuilder::new("DELETE FROM users")
            .properties(&[Property::new(ClauseKind::Where, "1 = 1; DROP TABLE users")])
            .unwrap_err();
        assert!(matches!(err, QueryError::ForbiddenFragment(_)));
    }

    #[test]
    fn test_should_join_checked_columns() {
        let columns = vec!["userId".to_string(), "roleId".to_string()];
        assert_eq!(
            column_list(&columns, guard::identifier),
            Ok("userId, roleId".to_string())
        );

        let columns = vec!["id".to_string(), "id FROM x".to_string()];
        assert_eq!(
            column_list(&columns, guard::identifier),
            Err(QueryError::InvalidIdentifier("id FROM x".to_string()))
        );
    }
}
