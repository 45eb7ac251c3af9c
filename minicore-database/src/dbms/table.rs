//! This module exposes the [`Table`]: the owner of a scheme and of a registry of named actions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use minicore_api::prelude::{
    Action, ActionId, DataAction, Dispatch, Gateway, MiniCoreResult, Parameters, QueryError,
    QueryOutcome, Scheme, TableError, TableResult, TableSchema, Value, guard,
};

use crate::dbms::action::{DeleteAction, InsertAction, SelectAction, UpdateAction};

/// Name of the connection tables run on unless told otherwise.
pub const DEFAULT_CONNECTION: &str = "default";

/// A database table.
///
/// A [`Table`] is created once at wiring time, with its scheme and the four default
/// actions (`insert`, `select`, `update`, `delete`). Actions are looked up by [`ActionId`]:
///
/// - [`Table::execute`] - Dispatch an action on a [`DataAction`].
/// - [`Table::execute_checked`] - Same, but validate the data first.
/// - [`Table::add_action`] / [`Table::remove_action`] - Edit the action registry.
/// - [`Table::create`], [`Table::drop`], [`Table::exist`] - DDL helpers.
///
/// Statements run on the [`Gateway`] the table was built with, on the connection
/// named by [`Table::connection`].
pub struct Table {
    /// Table name.
    name: String,
    /// Ordered column definitions.
    scheme: Scheme,
    /// Name of the gateway connection statements run on.
    connection: String,
    /// Gateway executing the statements.
    gateway: Arc<dyn Gateway>,
    /// Registered actions, unique by id.
    actions: BTreeMap<ActionId, Box<dyn Action>>,
}

impl Table {
    /// Creates a table with the default actions, running on [`DEFAULT_CONNECTION`].
    ///
    /// Fails if the name is not an identifier or the scheme is invalid.
    pub fn new(
        name: impl Into<String>,
        scheme: Scheme,
        gateway: Arc<dyn Gateway>,
    ) -> MiniCoreResult<Self> {
        let name = name.into();
        guard::identifier(&name)?;
        scheme.validate(&name)?;

        let defaults: [Box<dyn Action>; 4] = [
            Box::new(InsertAction::new(&name)),
            Box::new(SelectAction::new(&name)),
            Box::new(UpdateAction::new(&name)),
            Box::new(DeleteAction::new(&name)),
        ];
        let actions = defaults
            .into_iter()
            .map(|action| (action.id(), action))
            .collect();

        Ok(Self {
            name,
            scheme,
            connection: DEFAULT_CONNECTION.to_string(),
            gateway,
            actions,
        })
    }

    /// Creates a table from a [`TableSchema`].
    pub fn from_schema<T>(gateway: Arc<dyn Gateway>) -> MiniCoreResult<Self>
    where
        T: TableSchema,
    {
        Self::new(T::table_name(), T::scheme(), gateway)
    }

    /// Sets the connection statements run on.
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = connection.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Renders the scheme as `"{column} {definition}, ..."`.
    pub fn scheme_to_string(&self) -> String {
        self.scheme.to_sql()
    }

    /// Issues `CREATE TABLE {name} ({scheme})`.
    pub fn create(&self) -> MiniCoreResult<()> {
        let sql = format!("CREATE TABLE {} ({})", self.name, self.scheme_to_string());
        self.run(&sql, &Parameters::new()).map(|_| ())
    }

    /// Issues `DROP TABLE {name}`.
    pub fn drop(&self) -> MiniCoreResult<()> {
        let sql = format!("DROP TABLE {}", self.name);
        self.run(&sql, &Parameters::new()).map(|_| ())
    }

    /// Returns whether the table exists, i.e. whether `SHOW TABLES LIKE` returned any row.
    pub fn exist(&self) -> MiniCoreResult<bool> {
        let parameters = Parameters::from([(
            "table_name".to_string(),
            Value::Text(self.name.clone()),
        )]);
        let outcome = self.run("SHOW TABLES LIKE :table_name", &parameters)?;
        Ok(!outcome.is_empty())
    }

    /// Registers an action.
    ///
    /// Fails with [`TableError::DuplicateAction`] if an action with the same id exists;
    /// to override an action, remove it first.
    pub fn add_action<A>(&mut self, action: A) -> TableResult<()>
    where
        A: Action + 'static,
    {
        let id = action.id();
        if self.actions.contains_key(&id) {
            return Err(TableError::DuplicateAction {
                table: self.name.clone(),
                action: id.to_string(),
            });
        }

        log::debug!("registering action '{id}' on table '{}'", self.name);
        self.actions.insert(id, Box::new(action));
        Ok(())
    }

    /// Unregisters an action, returning it. No-op if absent.
    pub fn remove_action(&mut self, id: impl Into<ActionId>) -> Option<Box<dyn Action>> {
        self.actions.remove(&id.into())
    }

    pub fn has_action(&self, id: impl Into<ActionId>) -> bool {
        self.actions.contains_key(&id.into())
    }

    pub fn action(&self, id: impl Into<ActionId>) -> Option<&dyn Action> {
        self.actions.get(&id.into()).map(|action| action.as_ref())
    }

    /// Returns the ids of the registered actions.
    pub fn action_ids(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.keys()
    }

    /// Runs the `validate` of an action; `None` if no such action is registered.
    pub fn validate(&self, id: impl Into<ActionId>, data: &DataAction) -> Option<bool> {
        self.action(id).map(|action| action.validate(data))
    }

    /// Dispatches the action `id` on `data`.
    ///
    /// Returns [`Dispatch::UnknownAction`] when no such action is registered. The data
    /// is not validated; see [`Table::execute_checked`].
    pub fn execute(&self, id: impl Into<ActionId>, data: &DataAction) -> MiniCoreResult<Dispatch> {
        let id = id.into();
        let Some(action) = self.actions.get(&id) else {
            log::debug!("no action '{id}' on table '{}'", self.name);
            return Ok(Dispatch::UnknownAction(id));
        };

        log::trace!("dispatching '{id}' on table '{}'", self.name);
        if let Some(driver) = self.gateway.driver(&self.connection) {
            if !action.supported_drivers().contains(&driver) {
                log::warn!(
                    "action '{id}' of table '{}' does not declare support for driver '{driver}'",
                    self.name
                );
            }
        }

        action
            .execute(self.gateway.as_ref(), &self.connection, data)
            .map(Dispatch::Executed)
    }

    /// Validates then dispatches the action `id` on `data`.
    ///
    /// Fails with [`QueryError::UnknownAction`] if no such action is registered, and with
    /// [`QueryError::ValidationFailed`] if the action rejects the data.
    pub fn execute_checked(
        &self,
        id: impl Into<ActionId>,
        data: &DataAction,
    ) -> MiniCoreResult<QueryOutcome> {
        let id = id.into();
        match self.validate(&id, data) {
            None => Err(QueryError::UnknownAction(id.to_string()).into()),
            Some(false) => Err(QueryError::ValidationFailed {
                action: id.to_string(),
            }
            .into()),
            Some(true) => Ok(self.execute(id, data)?.into_result()?),
        }
    }

    /// Runs a statement which is not bound to an action.
    fn run(&self, sql: &str, parameters: &Parameters) -> MiniCoreResult<QueryOutcome> {
        log::debug!("[{}] {sql}", self.connection);
        Ok(self.gateway.execute(&self.connection, sql, parameters)?)
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("scheme", &self.scheme)
            .field("connection", &self.connection)
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {

    use minicore_api::prelude::{ClauseKind, Driver, MiniCoreError, QueryResult};

    use super::*;
    use crate::tests::{User, memory_gateway, users_table};

    /// A custom action archiving rows into another table.
    struct ArchiveAction;

    impl Action for ArchiveAction {
        fn id(&self) -> ActionId {
            ActionId::Custom("archive".to_string())
        }

        fn supported_drivers(&self) -> &[Driver] {
            &[Driver::Mysql]
        }

        fn validate(&self, data: &DataAction) -> bool {
            !data.properties().is_empty()
        }

        fn build(&self, data: &DataAction) -> QueryResult<String> {
            Ok(
                crate::dbms::statement::StatementBuilder::new(
                    "INSERT INTO users_archive SELECT * FROM users",
                )
                .properties(data.properties())?
                .build(),
            )
        }
    }

    #[test]
    fn test_should_create_table_with_default_actions() {
        let (gateway, _) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway);

        let ids = table.action_ids().cloned().collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                ActionId::Insert,
                ActionId::Select,
                ActionId::Update,
                ActionId::Delete
            ]
        );
        assert_eq!(table.connection(), DEFAULT_CONNECTION);
    }

    #[test]
    fn test_should_issue_one_statement_per_default_action() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway);

        let data = DataAction::new()
            .with_column("name")
            .with_property(ClauseKind::Where, "id = :id")
            .with_parameter("id", 1)
            .with_parameter("name", "alice");

        for (id, prefix) in [
            (ActionId::Insert, "INSERT INTO users"),
            (ActionId::Select, "SELECT name FROM users"),
            (ActionId::Update, "UPDATE users"),
            (ActionId::Delete, "DELETE FROM users"),
        ] {
            memory.clear_journal();
            let dispatch = table.execute(id, &data).expect("failed to execute");
            assert!(!dispatch.is_unknown_action());

            let journal = memory.journal();
            assert_eq!(journal.len(), 1);
            assert!(
                journal[0].sql.starts_with(prefix),
                "{} should start with {prefix}",
                journal[0].sql
            );
        }
    }

    #[test]
    fn test_should_pass_parameters_verbatim() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway);

        let mut data = DataAction::new();
        data.add_property(ClauseKind::Where, "id = :id", [("id", 5)]);
        table.execute("delete", &data).expect("failed to execute");

        let statement = memory.last_statement().expect("no statement");
        assert!(statement.sql.ends_with("WHERE id = :id"));
        assert_eq!(
            statement.parameters,
            Parameters::from([("id".to_string(), Value::Int64(5))])
        );
    }

    #[test]
    fn test_should_return_unknown_action_after_removal() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let mut table = users_table(gateway);

        assert!(table.remove_action("delete").is_some());
        let data = DataAction::new().with_property(ClauseKind::Where, "id = 1");
        let dispatch = table.execute("delete", &data).expect("should not fail");

        assert_eq!(dispatch, Dispatch::UnknownAction(ActionId::Delete));
        assert!(memory.journal().is_empty());
    }

    #[test]
    fn test_should_ignore_removal_of_missing_action() {
        let (gateway, _) = memory_gateway(Driver::Mysql);
        let mut table = users_table(gateway);

        assert!(table.remove_action("archive").is_none());
        assert_eq!(table.action_ids().count(), 4);
    }

    #[test]
    fn test_should_tell_empty_select_from_unknown_action() {
        let (gateway, _) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway);

        let data = DataAction::new().with_column("id");
        let selected = table.execute("select", &data).expect("failed to execute");
        let unknown = table.execute("purge", &data).expect("failed to execute");

        assert_eq!(selected, Dispatch::Executed(QueryOutcome::Rows(vec![])));
        assert_eq!(
            unknown,
            Dispatch::UnknownAction(ActionId::Custom("purge".to_string()))
        );
    }

    #[test]
    fn test_should_add_custom_action() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let mut table = users_table(gateway);

        table.add_action(ArchiveAction).expect("failed to add action");
        assert!(table.has_action("archive"));

        let data = DataAction::new().with_property(ClauseKind::Where, "id < 10");
        table.execute("archive", &data).expect("failed to execute");
        assert_eq!(
            memory.last_statement().expect("no statement").sql,
            "INSERT INTO users_archive SELECT * FROM users WHERE id < 10"
        );
    }

    #[test]
    fn test_should_dispatch_action_on_undeclared_driver() {
        let (gateway, memory) = memory_gateway(Driver::Sqlite);
        let mut table = users_table(gateway);
        table.add_action(ArchiveAction).expect("failed to add action");

        let data = DataAction::new().with_property(ClauseKind::Where, "id < 10");
        let dispatch = table.execute("archive", &data).expect("failed to execute");

        assert_eq!(dispatch, Dispatch::Executed(QueryOutcome::Affected(1)));
        assert_eq!(
            memory.last_statement().expect("no statement").sql,
            "INSERT INTO users_archive SELECT * FROM users WHERE id < 10"
        );
    }

    #[test]
    fn test_should_reject_duplicate_action() {
        let (gateway, _) = memory_gateway(Driver::Mysql);
        let mut table = users_table(gateway);

        let err = table
            .add_action(DeleteAction::new("users"))
            .expect_err("should reject duplicate");
        assert_eq!(
            err,
            TableError::DuplicateAction {
                table: "users".to_string(),
                action: "delete".to_string(),
            }
        );
    }

    #[test]
    fn test_should_override_action_by_remove_then_add() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let mut table = users_table(gateway);

        table.remove_action(ActionId::Delete);
        table
            .add_action(DeleteAction::new("users_archive"))
            .expect("failed to add action");

        let data = DataAction::new().with_property(ClauseKind::Limit, "1");
        table.execute(ActionId::Delete, &data).expect("failed to execute");
        assert_eq!(
            memory.last_statement().expect("no statement").sql,
            "DELETE FROM users_archive LIMIT 1"
        );
    }

    #[test]
    fn test_should_execute_checked() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway);

        let err = table
            .execute_checked("delete", &DataAction::new())
            .expect_err("should fail validation");
        assert_eq!(
            err,
            MiniCoreError::Query(QueryError::ValidationFailed {
                action: "delete".to_string()
            })
        );
        assert!(memory.journal().is_empty());

        let err = table
            .execute_checked("purge", &DataAction::new())
            .expect_err("should fail lookup");
        assert_eq!(
            err,
            MiniCoreError::Query(QueryError::UnknownAction("purge".to_string()))
        );

        let data = DataAction::new().with_property(ClauseKind::Where, "id = 1");
        let outcome = table
            .execute_checked("delete", &data)
            .expect("failed to execute");
        assert_eq!(outcome, QueryOutcome::Affected(1));
    }

    #[test]
    fn test_should_create_users_table() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let scheme = Scheme::new()
            .column("id", "INT AUTO_INCREMENT PRIMARY KEY")
            .column("name", "VARCHAR(255)");
        let table = Table::new("users", scheme, gateway).expect("failed to create table");

        table.create().expect("failed to create");
        assert_eq!(
            memory.last_statement().expect("no statement").sql,
            "CREATE TABLE users (id INT AUTO_INCREMENT PRIMARY KEY, name VARCHAR(255))"
        );
    }

    #[test]
    fn test_should_check_existence_and_drop() {
        let (gateway, memory) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway);

        assert!(!table.exist().expect("failed to check"));
        let statement = memory.last_statement().expect("no statement");
        assert_eq!(statement.sql, "SHOW TABLES LIKE :table_name");
        assert_eq!(
            statement.parameters["table_name"],
            Value::Text("users".to_string())
        );

        table.create().expect("failed to create");
        assert!(table.exist().expect("failed to check"));

        table.drop().expect("failed to drop");
        assert_eq!(
            memory.last_statement().expect("no statement").sql,
            "DROP TABLE users"
        );
        assert!(!table.exist().expect("failed to check"));
    }

    #[test]
    fn test_should_propagate_gateway_failure() {
        let (gateway, _) = memory_gateway(Driver::Mysql);
        let table = users_table(gateway).with_connection("replica");

        let err = table
            .execute("select", &DataAction::new().with_column("id"))
            .expect_err("unknown connection should fail");
        assert!(matches!(err, MiniCoreError::Gateway(_)));
    }

    #[test]
    fn test_should_build_from_schema() {
        let (gateway, memory) = memory_gateway(Driver::Sqlite);
        let table = Table::from_schema::<User>(gateway).expect("failed to create table");
        assert_eq!(table.name(), "users");

        let data = DataAction::from_record(User {
            id: 0,
            name: "alice".to_string(),
        });
        table.execute("insert", &data).expect("failed to execute");
        assert_eq!(
            memory.last_statement().expect("no statement").sql,
            "INSERT INTO users (name) VALUES (:name)"
        );
    }

    #[test]
    fn test_should_reject_invalid_table() {
        let (gateway, _) = memory_gateway(Driver::Mysql);
        let scheme = Scheme::new().column("id", "INT");

        assert!(matches!(
            Table::new("users; DROP TABLE x", scheme.clone(), gateway.clone()),
            Err(MiniCoreError::Query(QueryError::InvalidIdentifier(_)))
        ));
        assert!(matches!(
            Table::new("users", Scheme::new(), gateway),
            Err(MiniCoreError::Table(TableError::EmptyScheme(_)))
        ));
    }
}
