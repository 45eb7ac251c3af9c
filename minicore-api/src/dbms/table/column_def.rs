/// Defines a column of a table known at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    /// The name of the column.
    pub name: &'static str,
    /// The raw column definition, e.g. `INT NOT NULL`.
    pub definition: &'static str,
    /// Indicates if the value is produced by the database (e.g. `AUTO_INCREMENT`)
    /// and must be left out of inserts.
    pub generated: bool,
}
