use super::{ColumnId, TableId};

/// A table index. The builder only emits unique indices today: one per
/// `unique` field and one per model-level unique constraint.
#[derive(Debug, Clone)]
pub struct Index {
    /// Uniquely identifies the index within its table
    pub id: IndexId,

    /// Index name, derived from the table and column names
    pub name: String,

    /// Columns included in the index
    pub columns: Vec<ColumnId>,

    /// When `true`, indexed entries are unique
    pub unique: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexId {
    pub table: TableId,
    pub index: usize,
}
