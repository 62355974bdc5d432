use super::{FieldDef, MixinDef};
use crate::schema::app::{Constraint, DatabaseHandle, SchemaHandle};

/// Declaration of a model: the explicit equivalent of a model class body.
///
/// Register declarations with [`Builder::register`]; nothing is resolved
/// until [`Builder::build`] runs.
///
/// [`Builder::register`]: crate::schema::Builder::register
/// [`Builder::build`]: crate::schema::Builder::build
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// The model name, unique within a schema
    pub name: String,

    /// Physical table-name override
    pub table_name: Option<String>,

    /// True for abstract bases: fields and metadata for inheritance only,
    /// no table. Never inherited; every declaration is concrete unless it
    /// says otherwise.
    pub abstract_model: bool,

    /// Base classes, in declaration order
    pub bases: Vec<BaseRef>,

    /// Fields declared directly on this model
    pub fields: Vec<FieldDef>,

    /// Meta attributes declared directly on this model
    pub meta: MetaDef,
}

/// One entry in a model's base list.
#[derive(Debug, Clone)]
pub enum BaseRef {
    /// A previously registered model, by name. Must be abstract.
    Model(String),

    /// An inline mixin: fields only.
    Mixin(MixinDef),
}

/// Meta attributes as declared. Unset attributes inherit from the base
/// chain; `constraints: Some(vec![])` re-declares an empty list and stops
/// inheritance.
#[derive(Debug, Clone, Default)]
pub struct MetaDef {
    pub metadata: Option<SchemaHandle>,
    pub database: Option<DatabaseHandle>,
    pub constraints: Option<Vec<Constraint>>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            abstract_model: false,
            bases: vec![],
            fields: vec![],
            meta: MetaDef::default(),
        }
    }

    /// Mark the model abstract.
    pub fn abstract_model(mut self) -> Self {
        self.abstract_model = true;
        self
    }

    /// Override the physical table name.
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Inherit from a previously registered abstract model.
    pub fn base(mut self, model_name: impl Into<String>) -> Self {
        self.bases.push(BaseRef::Model(model_name.into()));
        self
    }

    /// Pull fields in from a mixin.
    pub fn mixin(mut self, mixin: MixinDef) -> Self {
        self.bases.push(BaseRef::Mixin(mixin));
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare the schema registry handle.
    pub fn metadata(mut self, handle: SchemaHandle) -> Self {
        self.meta.metadata = Some(handle);
        self
    }

    /// Declare the connection handle.
    pub fn database(mut self, handle: DatabaseHandle) -> Self {
        self.meta.database = Some(handle);
        self
    }

    /// Declare a model-level constraint. Declaring any constraint replaces
    /// the inherited list.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.meta
            .constraints
            .get_or_insert_with(Vec::new)
            .push(constraint);
        self
    }
}
