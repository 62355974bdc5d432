mod field;
pub use field::{FieldDef, FieldTyDef, ForeignKeyDef, ManyToManyDef};

mod mixin;
pub use mixin::MixinDef;

mod model;
pub use model::{BaseRef, MetaDef, ModelDef};
