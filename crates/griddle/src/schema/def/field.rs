use crate::schema::app::ScalarType;
use crate::value::{FieldDefault, Value};

/// Declaration of a single field, before resolution.
///
/// Construct with [`FieldDef::scalar`], [`FieldDef::foreign_key`], or
/// [`FieldDef::many_to_many`], then chain the setters:
///
/// ```
/// use griddle::schema::app::ScalarType;
/// use griddle::schema::def::FieldDef;
///
/// let field = FieldDef::scalar("created_date", ScalarType::DateTime)
///     .column("creation_date")
///     .nullable();
/// ```
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// The field name
    pub name: String,

    /// Physical column-name override
    pub column_name: Option<String>,

    pub ty: FieldTyDef,

    pub primary_key: bool,

    pub nullable: bool,

    pub unique: bool,

    /// `None` derives the value: integer primary keys auto-increment
    pub auto_increment: Option<bool>,

    pub default: Option<FieldDefault>,

    pub max_length: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum FieldTyDef {
    Scalar(ScalarType),
    ForeignKey(ForeignKeyDef),
    ManyToMany(ManyToManyDef),
}

/// Foreign key declaration; the target model is referenced by name and
/// resolved when the schema is built.
#[derive(Debug, Clone)]
pub struct ForeignKeyDef {
    pub target: String,
    pub related_name: Option<String>,
}

/// Many-to-many declaration; the through table is generated unless a name
/// is supplied.
#[derive(Debug, Clone)]
pub struct ManyToManyDef {
    pub target: String,
    pub related_name: Option<String>,
    pub through: Option<String>,
}

impl FieldDef {
    /// A scalar column field.
    pub fn scalar(name: impl Into<String>, ty: ScalarType) -> Self {
        Self::new(name, FieldTyDef::Scalar(ty))
    }

    /// A foreign key to the model registered under `target`.
    pub fn foreign_key(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldTyDef::ForeignKey(ForeignKeyDef {
                target: target.into(),
                related_name: None,
            }),
        )
    }

    /// A many-to-many relation to the model registered under `target`.
    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldTyDef::ManyToMany(ManyToManyDef {
                target: target.into(),
                related_name: None,
                through: None,
            }),
        )
    }

    fn new(name: impl Into<String>, ty: FieldTyDef) -> Self {
        Self {
            name: name.into(),
            column_name: None,
            ty,
            primary_key: false,
            nullable: false,
            unique: false,
            auto_increment: None,
            default: None,
            max_length: None,
        }
    }

    /// Override the physical column name.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column_name = Some(name.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Force auto-increment on or off; the default derives it from the
    /// field type and primary-key flag.
    pub fn auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = Some(enabled);
        self
    }

    /// Literal default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Factory default, invoked once per new row.
    pub fn default_factory(mut self, factory: fn() -> Value) -> Self {
        self.default = Some(FieldDefault::Factory(factory));
        self
    }

    pub fn max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Reverse-accessor name installed on the relation target.
    ///
    /// # Panics
    ///
    /// Panics if the field is not a relation.
    #[track_caller]
    pub fn related_name(mut self, name: impl Into<String>) -> Self {
        match &mut self.ty {
            FieldTyDef::ForeignKey(fk) => fk.related_name = Some(name.into()),
            FieldTyDef::ManyToMany(m2m) => m2m.related_name = Some(name.into()),
            FieldTyDef::Scalar(_) => {
                panic!("related_name set on non-relation field `{}`", self.name)
            }
        }
        self
    }

    /// Through-table name for a many-to-many relation.
    ///
    /// # Panics
    ///
    /// Panics if the field is not a many-to-many relation.
    #[track_caller]
    pub fn through(mut self, name: impl Into<String>) -> Self {
        match &mut self.ty {
            FieldTyDef::ManyToMany(m2m) => m2m.through = Some(name.into()),
            _ => panic!("through set on non many-to-many field `{}`", self.name),
        }
        self
    }

    /// The physical column name the field lowers to.
    pub fn storage_name(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.name)
    }

    /// True if the field produces a column on its own table.
    pub fn has_column(&self) -> bool {
        matches!(
            self.ty,
            FieldTyDef::Scalar(_) | FieldTyDef::ForeignKey(_)
        )
    }
}
