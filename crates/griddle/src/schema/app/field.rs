use super::{ForeignKey, HasMany, ManyToMany, ModelId};
use crate::value::FieldDefault;
use std::fmt;

/// A resolved model field: one column or relation attribute, after
/// inheritance merging.
#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name
    pub name: FieldName,

    /// Scalar column, relation, or injected reverse accessor
    pub ty: FieldTy,

    /// True if the column may hold NULL
    pub nullable: bool,

    /// True if the field is the model's primary key
    pub primary_key: bool,

    /// True if the column carries a single-column unique index
    pub unique: bool,

    /// True if the database populates the column on insert
    pub auto_increment: bool,

    /// Applied when no value is supplied for a new row
    pub default: Option<FieldDefault>,

    /// Maximum length for string-typed columns
    pub max_length: Option<u64>,

    /// The model on which this exact definition was declared. Differs from
    /// `id.model` when the field was inherited from an abstract ancestor;
    /// relation-name disambiguation keys off this.
    pub origin: ModelId,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct FieldName {
    /// The name the field was declared with
    pub app_name: String,

    /// Physical column-name override, if declared
    pub storage_name: Option<String>,
}

impl FieldName {
    pub fn storage_name(&self) -> &str {
        self.storage_name.as_ref().unwrap_or(&self.app_name)
    }
}

#[derive(Clone)]
pub enum FieldTy {
    Scalar(ScalarType),
    ForeignKey(ForeignKey),
    ManyToMany(ManyToMany),
    /// Reverse accessor, synthesized during relation wiring; never declared.
    HasMany(HasMany),
}

/// Column types understood by the schema core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Integer,
    BigInteger,
    Float,
    Boolean,
    String,
    Text,
    Date,
    DateTime,
    Json,
    Uuid,
}

impl ScalarType {
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer | Self::BigInteger)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::BigInteger => "big_integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Json => "json",
            Self::Uuid => "uuid",
        }
    }
}

impl Field {
    /// The physical column name the field lowers to.
    pub fn column_name(&self) -> &str {
        self.name.storage_name()
    }

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// True if the field produces a column on its own table.
    pub fn has_column(&self) -> bool {
        matches!(self.ty, FieldTy::Scalar(_) | FieldTy::ForeignKey(_))
    }

    /// If the field is a relation, the model it points at.
    pub fn relation_target(&self) -> Option<ModelId> {
        match &self.ty {
            FieldTy::ForeignKey(fk) => Some(fk.target),
            FieldTy::ManyToMany(m2m) => Some(m2m.target),
            FieldTy::HasMany(has_many) => Some(has_many.target),
            FieldTy::Scalar(_) => None,
        }
    }
}

impl FieldTy {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(..))
    }

    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(ty) => Some(*ty),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::ForeignKey(..) | Self::ManyToMany(..) | Self::HasMany(..)
        )
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey(..))
    }

    pub fn as_foreign_key(&self) -> Option<&ForeignKey> {
        match self {
            Self::ForeignKey(fk) => Some(fk),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_foreign_key(&self) -> &ForeignKey {
        match self {
            Self::ForeignKey(fk) => fk,
            _ => panic!("expected field to be `ForeignKey`, but was {self:?}"),
        }
    }

    #[track_caller]
    pub fn expect_foreign_key_mut(&mut self) -> &mut ForeignKey {
        match self {
            Self::ForeignKey(fk) => fk,
            _ => panic!("expected field to be `ForeignKey`, but was {self:?}"),
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        matches!(self, Self::ManyToMany(..))
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Self::ManyToMany(m2m) => Some(m2m),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_many_to_many_mut(&mut self) -> &mut ManyToMany {
        match self {
            Self::ManyToMany(m2m) => m2m,
            _ => panic!("expected field to be `ManyToMany`, but was {self:?}"),
        }
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self, Self::HasMany(..))
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Self::HasMany(has_many) => Some(has_many),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ty) => ty.fmt(fmt),
            Self::ForeignKey(ty) => ty.fmt(fmt),
            Self::ManyToMany(ty) => ty.fmt(fmt),
            Self::HasMany(ty) => ty.fmt(fmt),
        }
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
