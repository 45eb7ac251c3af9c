use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dbms::data_action::Parameters;
use crate::dbms::query::guard;
use crate::dbms::table::column_def::ColumnDef;
use crate::dbms::table::{TableError, TableResult};

/// Table schema known at compile time.
///
/// Usually derived with `#[derive(TableSchema)]`.
pub trait TableSchema: Sized {
    /// Returns the name of the table.
    fn table_name() -> &'static str;

    /// Returns the column definitions of the table, in declaration order.
    fn columns() -> &'static [ColumnDef];

    /// Converts the record into insert parameters, leaving out generated columns.
    fn into_parameters(self) -> Parameters;

    /// Returns the [`Scheme`] used to create the table.
    fn scheme() -> Scheme {
        Self::columns()
            .iter()
            .map(|column| (column.name, column.definition))
            .collect()
    }
}

/// Ordered mapping between column names and their raw definitions.
///
/// Definitions are concatenated verbatim into `CREATE TABLE`, so the order of
/// insertion is the column order of the table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scheme {
    columns: Vec<(String, String)>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Scheme::push`].
    pub fn column(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.push(name, definition);
        self
    }

    /// Appends a column definition.
    ///
    /// If the column already exists, its definition is replaced in place.
    pub fn push(&mut self, name: impl Into<String>, definition: impl Into<String>) {
        let name = name.into();
        let definition = definition.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => *current = definition,
            None => self.columns.push((name, definition)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, definition)| (name.as_str(), definition.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders the scheme as the column list of a `CREATE TABLE` statement.
    pub fn to_sql(&self) -> String {
        self.iter()
            .map(|(name, definition)| format!("{name} {definition}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Checks that the scheme is non-empty, that column names are identifiers
    /// and that definitions carry no statement terminator or comment.
    pub fn validate(&self, table: &str) -> TableResult<()> {
        if self.is_empty() {
            return Err(TableError::EmptyScheme(table.to_string()));
        }

        for (name, definition) in self.iter() {
            guard::identifier(name)
                .and_then(|_| guard::fragment(definition))
                .map_err(|err| TableError::InvalidScheme {
                    table: table.to_string(),
                    reason: err.to_string(),
                })?;
        }

        Ok(())
    }
}

impl<N, D> FromIterator<(N, D)> for Scheme
where
    N: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, D)>>(iter: I) -> Self {
        let mut scheme = Self::new();
        for (name, definition) in iter {
            scheme.push(name, definition);
        }
        scheme
    }
}

impl Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, definition) in self.iter() {
            map.serialize_entry(name, definition)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemeVisitor;

        impl<'de> Visitor<'de> for SchemeVisitor {
            type Value = Scheme;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column names to column definitions")
            }

            // entries are visited in source order
            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scheme = Scheme::new();
                while let Some((name, definition)) = access.next_entry::<String, String>()? {
                    scheme.push(name, definition);
                }
                Ok(scheme)
            }
        }

        deserializer.deserialize_map(SchemeVisitor)
    }
}
