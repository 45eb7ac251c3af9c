//! This module exposes the types shared by statement builders and their callers.

pub mod guard;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dbms::action::ActionId;
use crate::dbms::value::Value;

/// A row returned by a select-type statement.
pub type Row = BTreeMap<String, Value>;

/// The result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// An enum representing possible errors that can occur while building a statement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A table or column name is not a plain SQL identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// A condition or definition contains a statement terminator or a comment.
    #[error("Forbidden fragment: '{0}'")]
    ForbiddenFragment(String),

    /// A condition or definition is blank.
    #[error("Empty fragment")]
    EmptyFragment,

    /// The clause keyword is not in the supported set.
    #[error("Unknown clause: '{0}'")]
    UnknownClause(String),

    /// The action rejected the data before execution.
    #[error("Validation failed for action '{action}'")]
    ValidationFailed { action: String },

    /// No action with this id is registered on the table.
    #[error("Unknown action: '{0}'")]
    UnknownAction(String),
}

/// What the gateway returned for a statement.
///
/// Interpreting the outcome is up to the caller: select-type statements yield rows,
/// everything else the number of affected rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOutcome {
    Rows(Vec<Row>),
    Affected(u64),
}

impl QueryOutcome {
    /// Returns whether no row was returned or affected.
    pub fn is_empty(&self) -> bool {
        match self {
            QueryOutcome::Rows(rows) => rows.is_empty(),
            QueryOutcome::Affected(count) => *count == 0,
        }
    }

    /// Returns the rows, if this is a row outcome.
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Affected(_) => None,
        }
    }

    /// Consumes the outcome and returns its rows; affected counts yield no rows.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Affected(_) => Vec::new(),
        }
    }

    /// Returns the affected row count, if this is an affected outcome.
    pub fn affected(&self) -> Option<u64> {
        match self {
            QueryOutcome::Rows(_) => None,
            QueryOutcome::Affected(count) => Some(*count),
        }
    }
}

/// The outcome of dispatching a named action on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The action was found and executed.
    Executed(QueryOutcome),
    /// No action with this id is registered.
    UnknownAction(ActionId),
}

impl Dispatch {
    pub fn is_unknown_action(&self) -> bool {
        matches!(self, Dispatch::UnknownAction(_))
    }

    /// Returns the outcome, if the action was executed.
    pub fn outcome(&self) -> Option<&QueryOutcome> {
        match self {
            Dispatch::Executed(outcome) => Some(outcome),
            Dispatch::UnknownAction(_) => None,
        }
    }

    /// Converts an unknown action into [`QueryError::UnknownAction`].
    pub fn into_result(self) -> QueryResult<QueryOutcome> {
        match self {
            Dispatch::Executed(outcome) => Ok(outcome),
            Dispatch::UnknownAction(id) => Err(QueryError::UnknownAction(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_tell_empty_outcome() {
        assert!(QueryOutcome::Rows(vec![]).is_empty());
        assert!(QueryOutcome::Affected(0).is_empty());
        assert!(!QueryOutcome::Affected(3).is_empty());

        let row = Row::from([("id".to_string(), Value::Int64(1))]);
        assert!(!QueryOutcome::Rows(vec![row]).is_empty());
    }

    #[test]
    fn test_should_access_outcome() {
        let outcome = QueryOutcome::Affected(2);
        assert_eq!(outcome.affected(), Some(2));
        assert!(outcome.rows().is_none());
        assert!(outcome.into_rows().is_empty());
    }

    #[test]
    fn test_should_distinguish_unknown_action_from_empty_result() {
        let empty = Dispatch::Executed(QueryOutcome::Rows(vec![]));
        let unknown = Dispatch::UnknownAction(ActionId::Delete);

        assert!(!empty.is_unknown_action());
        assert!(unknown.is_unknown_action());
        assert_eq!(empty.outcome(), Some(&QueryOutcome::Rows(vec![])));
        assert_eq!(unknown.outcome(), None);
        assert_eq!(
            unknown.into_result(),
            Err(QueryError::UnknownAction("delete".to_string()))
        );
    }
}
