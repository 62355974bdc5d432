use super::{ColumnId, TableId};

/// A foreign-key constraint: one column referencing the primary-key column
/// of another table.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// The constrained column on the owning table
    pub column: ColumnId,

    /// The referenced table
    pub target_table: TableId,

    /// The referenced column (the target table's primary key)
    pub target_column: ColumnId,
}
