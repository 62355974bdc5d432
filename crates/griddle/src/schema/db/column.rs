use super::TableId;
use crate::schema::app::ScalarType;
use crate::value::Value;
use std::fmt;

/// A table column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Uniquely identifies the column in the schema
    pub id: ColumnId,

    /// The name of the column in the database
    pub name: String,

    /// The column type
    pub ty: ScalarType,

    /// Whether the column is nullable
    pub nullable: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,

    /// True if the database populates the column on insert
    pub auto_increment: bool,

    /// Maximum length for string-typed columns
    pub max_length: Option<u64>,

    /// Literal server-side default. Factory defaults are applied per row by
    /// the insert path and never appear here.
    pub default: Option<Value>,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct ColumnId {
    pub table: TableId,
    pub index: usize,
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.table.0, self.index)
    }
}
