use crate::schema::app::{Field, FieldId, FieldTy, Model, ModelId, Schema};

/// A reverse accessor: the collection installed on the target of a
/// foreign-key or many-to-many relation. Synthesized during relation
/// wiring, never declared, and never lowered to a column.
#[derive(Debug, Clone)]
pub struct HasMany {
    /// The model the accessor leads back to (the relation's owner)
    pub target: ModelId,

    /// The relation field that caused this accessor to be injected
    pub pair: FieldId,
}

impl HasMany {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    /// The relation field on the owning model.
    pub fn pair<'a>(&self, schema: &'a Schema) -> &'a Field {
        schema.field(self.pair)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}
