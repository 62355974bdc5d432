use super::{Column, ColumnId, ForeignKey, Index};
use std::fmt;

/// A database table: the ground truth handed to DDL collaborators.
#[derive(Debug)]
pub struct Table {
    /// Uniquely identifies the table
    pub id: TableId,

    /// Physical name of the table, with any builder prefix applied
    pub name: String,

    /// The table's columns, in field declaration/merge order
    pub columns: Vec<Column>,

    pub primary_key: PrimaryKey,

    /// Unique indices: single-column for `unique` fields, composite for
    /// model-level constraints
    pub indices: Vec<Index>,

    /// Foreign-key constraints, in column order
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, Default)]
pub struct PrimaryKey {
    /// Columns composing the primary key
    pub columns: Vec<ColumnId>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct TableId(pub usize);

impl Table {
    pub(crate) fn new(id: TableId, name: String) -> Self {
        Self {
            id,
            name,
            columns: vec![],
            primary_key: PrimaryKey::default(),
            indices: vec![],
            foreign_keys: vec![],
        }
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .columns
            .iter()
            .map(|column_id| &self.columns[column_id.index])
    }
}

impl TableId {
    pub(crate) const fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl From<&Table> for TableId {
    fn from(value: &Table) -> Self {
        value.id
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
