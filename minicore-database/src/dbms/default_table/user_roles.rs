use std::sync::Arc;

use minicore_api::prelude::{
    ActionId, ClauseKind, DataAction, Gateway, MiniCoreResult, Parameters, QueryOutcome, Row,
    TableSchema,
};

use crate::dbms::table::Table;

/// A row of the `user_roles` table, linking a user to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TableSchema)]
#[table(name = "user_roles")]
pub struct UserRole {
    #[column(definition = "INT AUTO_INCREMENT PRIMARY KEY", generated)]
    pub id: u32,
    #[column(name = "userId", definition = "INT NOT NULL")]
    pub user_id: u32,
    #[column(name = "roleId", definition = "INT NOT NULL")]
    pub role_id: u32,
}

/// The `user_roles` table, used for role-based access control.
///
/// # Example
///
/// ```rust,ignore
/// let user_roles = UserRolesTable::new(gateway)?;
/// user_roles.add_role_to_user(1, 2)?;
/// assert!(user_roles.has_role(1, 2)?);
/// user_roles.remove_role_from_user(1, 2)?;
/// ```
#[derive(Debug)]
pub struct UserRolesTable {
    table: Table,
}

impl UserRolesTable {
    pub fn new(gateway: Arc<dyn Gateway>) -> MiniCoreResult<Self> {
        Ok(Self {
            table: Table::from_schema::<UserRole>(gateway)?,
        })
    }

    /// Wraps an already configured `user_roles` table.
    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Returns the `roleId` rows of a user.
    pub fn roles_by_user_id(&self, user_id: u32) -> MiniCoreResult<Vec<Row>> {
        let mut data = DataAction::new();
        data.add_column("roleId");
        data.add_property(ClauseKind::Where, "userId = :userId", [("userId", user_id)]);
        Ok(self.run(ActionId::Select, &data)?.into_rows())
    }

    /// Returns the `userId` rows of a role.
    pub fn users_by_role_id(&self, role_id: u32) -> MiniCoreResult<Vec<Row>> {
        let mut data = DataAction::new();
        data.add_column("userId");
        data.add_property(ClauseKind::Where, "roleId = :roleId", [("roleId", role_id)]);
        Ok(self.run(ActionId::Select, &data)?.into_rows())
    }

    /// Assigns a role to a user. Returns whether a row was inserted.
    pub fn add_role_to_user(&self, user_id: u32, role_id: u32) -> MiniCoreResult<bool> {
        let data = DataAction::from_record(UserRole {
            id: 0,
            user_id,
            role_id,
        });
        Ok(!self.run(ActionId::Insert, &data)?.is_empty())
    }

    /// Removes a role from a user. Returns whether a row was deleted.
    pub fn remove_role_from_user(&self, user_id: u32, role_id: u32) -> MiniCoreResult<bool> {
        let mut data = DataAction::new();
        data.add_property(
            ClauseKind::Where,
            "userId = :userId AND roleId = :roleId",
            [("userId", user_id), ("roleId", role_id)],
        );
        Ok(!self.run(ActionId::Delete, &data)?.is_empty())
    }

    /// Returns whether the user has the role.
    pub fn has_role(&self, user_id: u32, role_id: u32) -> MiniCoreResult<bool> {
        let mut data = DataAction::new();
        data.add_column("id");
        data.add_property(
            ClauseKind::Where,
            "userId = :userId AND roleId = :roleId",
            [("userId", user_id), ("roleId", role_id)],
        );
        data.add_property(ClauseKind::Limit, "1", Parameters::new());
        Ok(!self.run(ActionId::Select, &data)?.is_empty())
    }

    fn run(&self, id: ActionId, data: &DataAction) -> MiniCoreResult<QueryOutcome> {
        Ok(self.table.execute(id, data)?.into_result()?)
    }
}
