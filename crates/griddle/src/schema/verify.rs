use super::Schema;
use crate::schema::app::{FieldTy, ModelId, RelationKind};
use crate::schema::db::TableId;
use crate::Result;
use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_ids_populated());

        self.verify_field_names_are_unique()?;
        self.verify_tables_have_one_primary_key()?;
        self.verify_relations_resolve()?;
        Ok(())
    }

    /// Builder invariants: every id handed out during the build points at
    /// something real.
    fn verify_ids_populated(&self) -> bool {
        for model in self.schema.app.models() {
            assert_ne!(model.id, ModelId::placeholder());

            // Abstract models wire no relations; their relation fields keep
            // unset pairs until a concrete descendant carries them.
            if model.is_abstract() {
                continue;
            }

            let table = model.table().expect("concrete model has a table id");
            assert_ne!(table, TableId::placeholder());

            for field in &model.fields {
                match &field.ty {
                    FieldTy::ForeignKey(fk) => assert!(fk.pair.is_some()),
                    FieldTy::ManyToMany(m2m) => assert!(m2m.pair.is_some()),
                    _ => {}
                }
            }
        }

        true
    }

    fn verify_field_names_are_unique(&self) -> Result<()> {
        for model in self.schema.app.models() {
            let mut names = HashSet::new();
            for field in &model.fields {
                if !names.insert(field.name.app_name.as_str()) {
                    bail!(
                        "duplicate field name `{}` on model `{}`",
                        field.name.app_name,
                        model.name.upper_camel_case()
                    );
                }
            }
        }
        Ok(())
    }

    fn verify_tables_have_one_primary_key(&self) -> Result<()> {
        for table in self.schema.db.tables() {
            if table.primary_key.columns.is_empty() {
                bail!("table `{}` has no primary key", table.name);
            }
        }
        Ok(())
    }

    fn verify_relations_resolve(&self) -> Result<()> {
        for edge in self.schema.relations() {
            let target = self.schema.model(edge.to);

            if target.field_by_name(&edge.related_name).is_none() {
                bail!(
                    "relation `{}.{}` has no reverse field `{}` on `{}`",
                    self.schema.model(edge.from).name.upper_camel_case(),
                    edge.field_name,
                    edge.related_name,
                    target.name.upper_camel_case()
                );
            }

            if edge.kind == RelationKind::ManyToMany && edge.through.is_none() {
                bail!(
                    "many-to-many `{}.{}` has no through table",
                    self.schema.model(edge.from).name.upper_camel_case(),
                    edge.field_name
                );
            }
        }
        Ok(())
    }
}
