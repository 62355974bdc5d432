use super::{Field, FieldId, ModelMeta};
use crate::schema::{db::TableId, Name};
use std::fmt;

/// A resolved model: the immutable record produced for one declaration.
///
/// Built once during [`Builder::build`]; the only mutation after a model is
/// complete is the append-only injection of reverse-relation fields while
/// sibling models are wired.
///
/// [`Builder::build`]: crate::schema::Builder::build
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    /// Distinguishes concrete models (with tables) from abstract bases
    pub kind: ModelKind,

    /// Fields in declaration/merge order. An overriding redeclaration keeps
    /// the position of the field it replaced; injected reverse accessors are
    /// appended at the end.
    pub fields: Vec<Field>,

    /// Storage handles and model-level constraints
    pub meta: ModelMeta,
}

#[derive(Debug, Clone)]
pub enum ModelKind {
    /// Maps to a physical table and can be the target of relations
    Concrete(ModelConcrete),

    /// Declares fields and metadata for inheritance only; never gets a table
    Abstract,
}

#[derive(Debug, Clone)]
pub struct ModelConcrete {
    /// Logical table name: the declared override, or the pluralized lowered
    /// model name
    pub table_name: String,

    /// The table built for this model
    pub table: TableId,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, ModelKind::Concrete(_))
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, ModelKind::Abstract)
    }

    /// The logical table name, if this is a concrete model.
    pub fn table_name(&self) -> Option<&str> {
        match &self.kind {
            ModelKind::Concrete(concrete) => Some(&concrete.table_name),
            ModelKind::Abstract => None,
        }
    }

    /// The table built for this model, if concrete.
    pub fn table(&self) -> Option<TableId> {
        match &self.kind {
            ModelKind::Concrete(concrete) => Some(concrete.table),
            ModelKind::Abstract => None,
        }
    }

    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.app_name == name)
    }

    /// The primary-key field. Concrete models always have exactly one;
    /// abstract models may have none.
    pub fn primary_key(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.primary_key)
    }

    /// Fields that were synthesized as reverse accessors, in injection
    /// order.
    pub fn reverse_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.ty.is_has_many())
    }
}

impl ModelId {
    /// Create a `FieldId` referring to this model's field at `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId { model: self, index }
    }

    pub(crate) const fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
