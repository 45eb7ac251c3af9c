use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dbms::clause::ClauseKind;
use crate::dbms::table::TableSchema;
use crate::dbms::value::Value;

/// Bound parameters of a statement, keyed by placeholder name (without the leading `:`).
pub type Parameters = BTreeMap<String, Value>;

/// A clause fragment appended after the base statement, rendered as `{kind} {condition}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Clause keyword.
    pub kind: ClauseKind,
    /// Clause body, e.g. `id = :id` or `1`.
    pub condition: String,
}

impl Property {
    pub fn new(kind: ClauseKind, condition: impl Into<String>) -> Self {
        Self {
            kind,
            condition: condition.into(),
        }
    }
}

/// The per-call payload of an action: columns, ordered clause fragments and bound parameters.
///
/// A [`DataAction`] is a passive holder and performs no validation; each action decides
/// whether the data is acceptable through its own `validate`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAction {
    columns: Vec<String>,
    properties: Vec<Property>,
    parameters: Parameters,
}

impl DataAction {
    /// Creates an empty [`DataAction`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`DataAction`] carrying the insertable columns of `record` and their values.
    pub fn from_record<T>(record: T) -> Self
    where
        T: TableSchema,
    {
        let mut data = Self::new();
        for column in T::columns().iter().filter(|column| !column.generated) {
            data.add_column(column.name);
        }
        data.add_parameters(record.into_parameters());
        data
    }

    /// Appends a column. Duplicates are kept.
    pub fn add_column(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
    }

    /// Appends a clause fragment and merges its parameters; a later value wins on key clash.
    pub fn add_property<I, K, V>(&mut self, kind: ClauseKind, condition: impl Into<String>, parameters: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.properties.push(Property::new(kind, condition));
        self.add_parameters(parameters);
    }

    /// Bulk-merges parameters.
    pub fn add_parameters<I, K, V>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.parameters.extend(
            parameters
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }

    /// Sets a single parameter.
    pub fn add_parameter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Builder-style [`DataAction::add_column`].
    pub fn with_column(mut self, name: impl Into<String>) -> Self {
        self.add_column(name);
        self
    }

    /// Builder-style [`DataAction::add_property`] without parameters.
    pub fn with_property(mut self, kind: ClauseKind, condition: impl Into<String>) -> Self {
        self.properties.push(Property::new(kind, condition));
        self
    }

    /// Builder-style [`DataAction::add_parameter`].
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_parameter(key, value);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
