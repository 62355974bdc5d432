use crate::schema::app::{Field, FieldId, FieldTy, Model, ModelId, Schema};

/// A declared foreign-key relation. Lowered to a single column on the
/// owning table plus a foreign-key constraint against the target's primary
/// key.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// Model the relation points at
    pub target: ModelId,

    /// Reverse-accessor name requested in the declaration, if any. The name
    /// actually installed may differ when sibling models inherit the same
    /// declaration; see the relation edge.
    pub related_name: Option<String>,

    /// The reverse field injected on the target, once wired
    pub pair: Option<FieldId>,
}

impl ForeignKey {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    /// The injected reverse field on the target model.
    pub fn pair<'a>(&self, schema: &'a Schema) -> Option<&'a Field> {
        self.pair.map(|id| schema.field(id))
    }
}

impl From<ForeignKey> for FieldTy {
    fn from(value: ForeignKey) -> Self {
        Self::ForeignKey(value)
    }
}
