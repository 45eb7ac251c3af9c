use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dbms::data_action::DataAction;
use crate::dbms::gateway::Gateway;
use crate::dbms::query::{QueryOutcome, QueryResult, guard};
use crate::error::MiniCoreResult;

/// Identifies an action registered on a table.
///
/// The four statement kinds have dedicated variants; anything else is a custom action.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionId {
    Insert,
    Select,
    Update,
    Delete,
    Custom(String),
}

impl ActionId {
    pub fn as_str(&self) -> &str {
        match self {
            ActionId::Insert => "insert",
            ActionId::Select => "select",
            ActionId::Update => "update",
            ActionId::Delete => "delete",
            ActionId::Custom(name) => name,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ActionId {
    fn from(name: &str) -> Self {
        match name {
            "insert" => ActionId::Insert,
            "select" => ActionId::Select,
            "update" => ActionId::Update,
            "delete" => ActionId::Delete,
            custom => ActionId::Custom(custom.to_string()),
        }
    }
}

impl From<String> for ActionId {
    fn from(name: String) -> Self {
        ActionId::from(name.as_str())
    }
}

impl From<&ActionId> for ActionId {
    fn from(id: &ActionId) -> Self {
        id.clone()
    }
}

/// Database drivers an action may declare support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Mysql,
    Pgsql,
    Sqlite,
}

impl Driver {
    pub const ALL: [Driver; 3] = [Driver::Mysql, Driver::Pgsql, Driver::Sqlite];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Driver::Mysql => "mysql",
            Driver::Pgsql => "pgsql",
            Driver::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|driver| driver.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown driver '{s}'"))
    }
}

/// A named, reusable builder and executor of one statement kind for one table.
///
/// Implementors provide [`Action::build`]; the default [`Action::execute`] hands the built
/// statement and the bound parameters over to the [`Gateway`].
pub trait Action: Send + Sync {
    /// Returns the id the action is registered under.
    fn id(&self) -> ActionId;

    /// Returns the drivers the action declares support for.
    fn supported_drivers(&self) -> &[Driver] {
        &Driver::ALL
    }

    /// Checks the structural preconditions of the data.
    ///
    /// This is advisory: [`Action::execute`] does not call it.
    fn validate(&self, data: &DataAction) -> bool;

    /// Builds the SQL text for the data.
    fn build(&self, data: &DataAction) -> QueryResult<String>;

    /// Builds the statement and executes it on `connection` through `gateway`.
    fn execute(
        &self,
        gateway: &dyn Gateway,
        connection: &str,
        data: &DataAction,
    ) -> MiniCoreResult<QueryOutcome> {
        let sql = self.build(data)?;

        let missing = guard::missing_parameters(&sql, data.parameters());
        if !missing.is_empty() {
            log::warn!(
                "action '{}' executes with unbound placeholders {missing:?}: {sql}",
                self.id()
            );
        }

        log::debug!("[{connection}] {sql}");
        Ok(gateway.execute(connection, &sql, data.parameters())?)
    }
}
