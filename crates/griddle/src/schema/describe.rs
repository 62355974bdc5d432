use super::Schema;
use crate::schema::app::{Field, FieldTy, ModelId};
use crate::value::{FieldDefault, Value};

/// Serializable mirror of a resolved model: the boundary handed to
/// transport layers so they can derive validation schemas without
/// re-running inheritance resolution.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ModelDescription {
    pub model: String,
    pub table: Option<String>,
    pub fields: Vec<FieldDescription>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldDescription {
    pub name: String,

    /// Physical column name; absent for fields that produce no column
    pub column: Option<String>,

    /// Scalar type name, or `foreign_key` / `many_to_many` / `has_many`
    #[serde(rename = "type")]
    pub ty: String,

    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub max_length: Option<u64>,

    /// Literal default, when one exists. Factory defaults are runtime-only
    /// and are not described.
    pub default: Option<Value>,

    /// Related model name, for relation fields
    pub target: Option<String>,

    /// Reverse-accessor name installed on the target, for relation fields
    pub related_name: Option<String>,
}

impl Schema {
    /// Describe a model for the serialization boundary.
    pub fn describe(&self, id: impl Into<ModelId>) -> ModelDescription {
        let model = self.model(id);

        ModelDescription {
            model: model.name.upper_camel_case(),
            table: model.table_name().map(str::to_owned),
            fields: model
                .fields
                .iter()
                .map(|field| self.describe_field(field))
                .collect(),
        }
    }

    fn describe_field(&self, field: &Field) -> FieldDescription {
        let (ty, column, target, related_name) = match &field.ty {
            FieldTy::Scalar(scalar) => (
                scalar.as_str().to_string(),
                Some(field.column_name().to_string()),
                None,
                None,
            ),
            FieldTy::ForeignKey(fk) => (
                "foreign_key".to_string(),
                Some(field.column_name().to_string()),
                Some(self.model(fk.target).name.upper_camel_case()),
                fk.pair.map(|pair| self.field(pair).name.app_name.clone()),
            ),
            FieldTy::ManyToMany(m2m) => (
                "many_to_many".to_string(),
                None,
                Some(self.model(m2m.target).name.upper_camel_case()),
                m2m.pair.map(|pair| self.field(pair).name.app_name.clone()),
            ),
            FieldTy::HasMany(has_many) => (
                "has_many".to_string(),
                None,
                Some(self.model(has_many.target).name.upper_camel_case()),
                None,
            ),
        };

        FieldDescription {
            name: field.name.app_name.clone(),
            column,
            ty,
            nullable: field.nullable,
            primary_key: field.primary_key,
            unique: field.unique,
            max_length: field.max_length,
            default: field.default.as_ref().and_then(FieldDefault::as_value).cloned(),
            target,
            related_name,
        }
    }
}
