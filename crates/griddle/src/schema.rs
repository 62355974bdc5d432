pub mod app;
pub mod builder;
pub mod db;
pub mod def;

mod describe;
mod name;
mod verify;

pub use builder::Builder;
pub use describe::{FieldDescription, ModelDescription};
pub use name::Name;
pub(crate) use name::pluralize;

use crate::schema::app::{Field, FieldId, Model, ModelId, RelationEdge};
use crate::schema::db::{Table, TableId};

/// A fully resolved schema: the immutable output of [`Builder::build`].
#[derive(Debug)]
pub struct Schema {
    /// Application-level models, in registration order.
    pub app: app::Schema,

    /// Physical tables derived from the models, including many-to-many
    /// through tables.
    pub db: db::Schema,

    /// Every foreign-key and many-to-many edge, in resolution order.
    pub relations: Vec<RelationEdge>,
}

impl Schema {
    /// Get a model by ID.
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.app.model(id)
    }

    /// Look a model up by the name it was declared with.
    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.app.model_by_name(name)
    }

    /// Get a field by ID.
    pub fn field(&self, id: FieldId) -> &Field {
        self.app.field(id)
    }

    /// Get a table by ID.
    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.db.table(id)
    }

    /// Look a table up by its physical name.
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.db.table_by_name(name)
    }

    /// All relation edges, in the order they were wired.
    pub fn relations(&self) -> &[RelationEdge] {
        &self.relations
    }
}
