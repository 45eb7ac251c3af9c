use std::collections::{BTreeSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

use like::Like;
use minicore_api::prelude::{
    Connection, Driver, GatewayError, GatewayResult, Parameters, QueryOutcome, Row, Value,
};

/// A statement received by a [`MemoryConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub sql: String,
    pub parameters: Parameters,
}

/// An in-memory [`Connection`] recording every statement it receives.
///
/// It does not evaluate SQL. It keeps track of the tables created and dropped, so that
/// `SHOW TABLES LIKE` can be answered, and otherwise replies with the next queued
/// response or a default outcome:
///
/// - `SELECT` / `SHOW`: no rows.
/// - `CREATE` / `DROP` / `ALTER`: zero affected rows.
/// - anything else: one affected row.
#[derive(Debug)]
pub struct MemoryConnection {
    driver: Driver,
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    journal: Vec<ExecutedStatement>,
    tables: BTreeSet<String>,
    responses: VecDeque<GatewayResult<QueryOutcome>>,
}

impl MemoryConnection {
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Queues the response of the next statement which is not DDL bookkeeping.
    pub fn push_response(&self, response: GatewayResult<QueryOutcome>) {
        if let Ok(mut state) = self.state() {
            state.responses.push_back(response);
        }
    }

    /// Returns every statement received so far.
    pub fn journal(&self) -> Vec<ExecutedStatement> {
        self.state()
            .map(|state| state.journal.clone())
            .unwrap_or_default()
    }

    pub fn last_statement(&self) -> Option<ExecutedStatement> {
        self.state()
            .ok()
            .and_then(|state| state.journal.last().cloned())
    }

    pub fn clear_journal(&self) {
        if let Ok(mut state) = self.state() {
            state.journal.clear();
        }
    }

    /// Returns the names of the tables currently created.
    pub fn tables(&self) -> Vec<String> {
        self.state()
            .map(|state| state.tables.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn state(&self) -> GatewayResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| GatewayError::Poisoned(self.driver.to_string()))
    }
}

impl Connection for MemoryConnection {
    fn driver(&self) -> Driver {
        self.driver
    }

    fn query(&self, sql: &str, parameters: &Parameters) -> GatewayResult<QueryOutcome> {
        let mut state = self.state()?;
        state.journal.push(ExecutedStatement {
            sql: sql.to_string(),
            parameters: parameters.clone(),
        });

        let sql = sql.trim();
        if let Some(rest) = strip_keyword(sql, "CREATE TABLE") {
            let name = table_name(rest);
            if !state.tables.insert(name.to_string()) {
                return Err(GatewayError::Driver(format!("table '{name}' already exists")));
            }
            return Ok(QueryOutcome::Affected(0));
        }
        if let Some(rest) = strip_keyword(sql, "DROP TABLE") {
            let name = table_name(rest);
            if !state.tables.remove(name) {
                return Err(GatewayError::Driver(format!("unknown table '{name}'")));
            }
            return Ok(QueryOutcome::Affected(0));
        }
        if let Some(rest) = strip_keyword(sql, "SHOW TABLES LIKE") {
            return show_tables_like(&state.tables, rest, parameters);
        }

        if let Some(response) = state.responses.pop_front() {
            return response;
        }

        if strip_keyword(sql, "SELECT").is_some() || strip_keyword(sql, "SHOW").is_some() {
            Ok(QueryOutcome::Rows(Vec::new()))
        } else if ["ALTER", "CREATE", "DROP"]
            .iter()
            .any(|keyword| strip_keyword(sql, keyword).is_some())
        {
            Ok(QueryOutcome::Affected(0))
        } else {
            Ok(QueryOutcome::Affected(1))
        }
    }
}

/// Strips a leading keyword, ignoring case, and returns what follows it.
fn strip_keyword<'a>(sql: &'a str, keyword: &str) -> Option<&'a str> {
    let head = sql.get(..keyword.len())?;
    let rest = &sql[keyword.len()..];
    let boundary = rest.is_empty() || rest.starts_with(char::is_whitespace);
    (head.eq_ignore_ascii_case(keyword) && boundary).then(|| rest.trim_start())
}

/// Reads the table name at the start of `rest`, up to a blank or `(`.
fn table_name(rest: &str) -> &str {
    rest.split(|ch: char| ch.is_whitespace() || ch == '(')
        .next()
        .unwrap_or_default()
        .trim_matches('`')
}

/// Answers `SHOW TABLES LIKE {pattern}`, the pattern being a placeholder or a quoted literal.
fn show_tables_like(
    tables: &BTreeSet<String>,
    pattern: &str,
    parameters: &Parameters,
) -> GatewayResult<QueryOutcome> {
    let pattern = match pattern.strip_prefix(':') {
        Some(placeholder) => match parameters.get(placeholder) {
            Some(Value::Text(text)) => text.clone(),
            Some(other) => {
                return Err(GatewayError::Driver(format!(
                    "LIKE pattern must be text, got {}",
                    other.type_name()
                )));
            }
            None => {
                return Err(GatewayError::Driver(format!(
                    "missing parameter '{placeholder}'"
                )));
            }
        },
        None => pattern.trim_matches(|ch| ch == '\'' || ch == '"').to_string(),
    };

    let mut rows = Vec::new();
    for table in tables {
        let matches = Like::<false>::like(table.as_str(), pattern.as_str())
            .map_err(|err| GatewayError::Driver(err.to_string()))?;
        if matches {
            rows.push(Row::from([("table_name".to_string(), Value::Text(table.clone()))]));
        }
    }
    Ok(QueryOutcome::Rows(rows))
}
