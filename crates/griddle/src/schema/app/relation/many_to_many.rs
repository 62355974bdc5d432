use crate::schema::app::{Field, FieldId, FieldTy, Model, ModelId, Schema};

/// A declared many-to-many relation. Produces no column on either side; a
/// through table with one foreign-key column per side is built instead.
#[derive(Debug, Clone)]
pub struct ManyToMany {
    /// Model the relation points at
    pub target: ModelId,

    /// Reverse-accessor name requested in the declaration, if any
    pub related_name: Option<String>,

    /// Through-table name override, if declared
    pub through: Option<String>,

    /// The reverse field injected on the target, once wired
    pub pair: Option<FieldId>,
}

impl ManyToMany {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    /// The injected reverse field on the target model.
    pub fn pair<'a>(&self, schema: &'a Schema) -> Option<&'a Field> {
        self.pair.map(|id| schema.field(id))
    }
}

impl From<ManyToMany> for FieldTy {
    fn from(value: ManyToMany) -> Self {
        Self::ManyToMany(value)
    }
}
