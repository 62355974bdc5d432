mod foreign_key;
pub use foreign_key::ForeignKey;

mod has_many;
pub use has_many::HasMany;

mod many_to_many;
pub use many_to_many::ManyToMany;

use super::ModelId;
use crate::schema::db::TableId;

/// A directed relation edge, owned by the schema. The target model holds
/// the injected reverse field; the edge is the authoritative record.
#[derive(Debug, Clone)]
pub struct RelationEdge {
    /// Model that declared the relation field
    pub from: ModelId,

    /// Model the relation points at
    pub to: ModelId,

    pub kind: RelationKind,

    /// Name of the relation field on `from`
    pub field_name: String,

    /// Reverse-accessor name installed on `to`
    pub related_name: String,

    /// Join table backing a many-to-many edge
    pub through: Option<TableId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    ForeignKey,
    ManyToMany,
}
