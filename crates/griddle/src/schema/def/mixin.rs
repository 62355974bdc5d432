use super::FieldDef;

/// A plain bundle of reusable field declarations.
///
/// Mixins contribute fields only: they carry no meta attributes, never get
/// a table, and do not participate in the metadata inheritance walk. A
/// mixin with no fields is valid and contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct MixinDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl MixinDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
        }
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}
