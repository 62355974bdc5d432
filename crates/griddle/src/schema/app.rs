mod constraint;
pub use constraint::{Constraint, UniqueColumns};

mod field;
pub use field::{Field, FieldId, FieldName, FieldTy, ScalarType};

mod meta;
pub use meta::{DatabaseHandle, ModelMeta, SchemaHandle};

mod model;
pub use model::{Model, ModelConcrete, ModelId, ModelKind};

mod relation;
pub use relation::{ForeignKey, HasMany, ManyToMany, RelationEdge, RelationKind};

use indexmap::IndexMap;

/// Application-level half of a resolved schema: every model, in
/// registration order.
#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

impl Schema {
    /// Get a model by ID.
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    /// Look a model up by the name it was declared with.
    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models
            .values()
            .find(|model| model.name.upper_camel_case() == name)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Get a field by ID.
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model)
            .fields
            .get(id.index)
            .expect("invalid field ID")
    }
}
