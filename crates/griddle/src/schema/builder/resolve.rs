use super::BuildSchema;
use crate::schema::app::{
    Field, FieldId, FieldName, FieldTy, ForeignKey, ManyToMany, Model, ModelConcrete, ModelId,
    ModelKind, ModelMeta,
};
use crate::schema::db::TableId;
use crate::schema::def::{BaseRef, FieldDef, FieldTyDef, MixinDef, ModelDef};
use crate::schema::{pluralize, Name};
use crate::Result;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A field declaration after inheritance merging, with the model that
/// declared this exact definition.
#[derive(Debug, Clone)]
pub(super) struct MergedField {
    pub(super) def: FieldDef,
    pub(super) origin: ModelId,
}

/// Ordered field declarations contributed by a mixin. A mixin declaring no
/// fields contributes nothing; that is not an error.
fn mixin_fields(mixin: &MixinDef) -> &[FieldDef] {
    &mixin.fields
}

impl BuildSchema<'_> {
    /// Resolve every declaration's fields and meta attributes, in
    /// registration order.
    pub(super) fn resolve_models(&mut self) -> Result<()> {
        for index in 0..self.defs.len() {
            self.resolve_model(ModelId(index))?;
        }
        Ok(())
    }

    fn resolve_model(&mut self, id: ModelId) -> Result<()> {
        let def = &self.defs[id.0];
        tracing::trace!(model = %def.name, "resolving");

        let chain = self.ancestor_chain(def)?;
        let merged = self.merge_fields(id, def);
        let meta = self.resolve_meta(def, &chain);

        self.validate_model(def, &merged, &meta)?;

        let model = self.materialize(id, def, &merged, meta)?;
        self.merged.insert(id, merged);
        self.chains.insert(id, chain);
        self.models.insert(id, model);
        Ok(())
    }

    /// Walk the model bases and produce the ancestor chain, root-first.
    /// Only abstract, already-resolved models may appear as bases.
    fn ancestor_chain(&self, def: &ModelDef) -> Result<Vec<ModelId>> {
        let mut chain: Vec<ModelId> = vec![];

        for base in &def.bases {
            let BaseRef::Model(base_name) = base else {
                continue;
            };

            let Some(&base_id) = self.ids.get(base_name) else {
                bail!(
                    "model `{}` inherits from `{}`, which is not registered",
                    def.name,
                    base_name
                );
            };

            let Some(base_model) = self.models.get(&base_id) else {
                bail!(
                    "model `{}` inherits from `{}`, which must be registered before it",
                    def.name,
                    base_name
                );
            };

            if !base_model.is_abstract() {
                bail!(
                    "model `{}` inherits from `{}`, which is not abstract; \
                     only abstract models can be subclassed",
                    def.name,
                    base_name
                );
            }

            for &ancestor in &self.chains[&base_id] {
                if !chain.contains(&ancestor) {
                    chain.push(ancestor);
                }
            }
            if !chain.contains(&base_id) {
                chain.push(base_id);
            }
        }

        Ok(chain)
    }

    /// Merge fields across bases and the model's own declarations.
    ///
    /// Bases are processed least-specific-first (reverse declaration order),
    /// the model's own fields last, so a later definition completely
    /// replaces an earlier one with the same name: type, constraints, and
    /// default are all replaced, never merged. Replacement keeps the
    /// position the name first appeared at.
    fn merge_fields(&self, id: ModelId, def: &ModelDef) -> IndexMap<String, MergedField> {
        let mut merged: IndexMap<String, MergedField> = IndexMap::new();

        for base in def.bases.iter().rev() {
            match base {
                BaseRef::Model(base_name) => {
                    let base_id = self.ids[base_name.as_str()];
                    for (field_name, merged_field) in &self.merged[&base_id] {
                        merged.insert(field_name.clone(), merged_field.clone());
                    }
                }
                BaseRef::Mixin(mixin) => {
                    // Mixin fields count as declared on the incorporating
                    // model; they do not participate in the inherited-name
                    // disambiguation rule.
                    for field in mixin_fields(mixin) {
                        merged.insert(
                            field.name.clone(),
                            MergedField {
                                def: field.clone(),
                                origin: id,
                            },
                        );
                    }
                }
            }
        }

        for field in &def.fields {
            merged.insert(
                field.name.clone(),
                MergedField {
                    def: field.clone(),
                    origin: id,
                },
            );
        }

        merged
    }

    /// Resolve meta attributes: the model's own declaration wins, otherwise
    /// the chain is walked root-first and the first member that declared
    /// the attribute supplies it. `abstract` is never inherited.
    fn resolve_meta(&self, def: &ModelDef, chain: &[ModelId]) -> ModelMeta {
        let metadata = def.meta.metadata.clone().or_else(|| {
            chain
                .iter()
                .find_map(|ancestor| self.defs[ancestor.0].meta.metadata.clone())
        });

        let database = def.meta.database.clone().or_else(|| {
            chain
                .iter()
                .find_map(|ancestor| self.defs[ancestor.0].meta.database.clone())
        });

        let constraints = def
            .meta
            .constraints
            .clone()
            .or_else(|| {
                chain
                    .iter()
                    .find_map(|ancestor| self.defs[ancestor.0].meta.constraints.clone())
            })
            .unwrap_or_default();

        ModelMeta {
            metadata,
            database,
            constraints,
        }
    }

    fn validate_model(
        &self,
        def: &ModelDef,
        merged: &IndexMap<String, MergedField>,
        meta: &ModelMeta,
    ) -> Result<()> {
        let pk_count = merged
            .values()
            .filter(|merged_field| merged_field.def.primary_key)
            .count();

        if pk_count > 1 {
            bail!(
                "model `{}` declares {pk_count} primary-key fields; exactly one is allowed",
                def.name
            );
        }

        if def.abstract_model {
            // Abstract models have no physical columns; handle and
            // constraint validation happens on their concrete descendants.
            return Ok(());
        }

        if pk_count == 0 {
            bail!("model `{}` has no primary-key field", def.name);
        }

        if meta.metadata.is_none() {
            bail!(
                "model `{}` resolved without a schema registry handle (`metadata`); \
                 declare one on the model or an ancestor",
                def.name
            );
        }

        if meta.database.is_none() {
            bail!(
                "model `{}` resolved without a connection handle (`database`); \
                 declare one on the model or an ancestor",
                def.name
            );
        }

        let columns: HashSet<&str> = merged
            .values()
            .filter(|merged_field| merged_field.def.has_column())
            .map(|merged_field| merged_field.def.storage_name())
            .collect();

        for constraint in &meta.constraints {
            for column in constraint.column_names() {
                if !columns.contains(column.as_str()) {
                    bail!(
                        "constraint on model `{}` references column `{}`, \
                         which is missing from the merged column set",
                        def.name,
                        column
                    );
                }
            }
        }

        Ok(())
    }

    fn materialize(
        &self,
        id: ModelId,
        def: &ModelDef,
        merged: &IndexMap<String, MergedField>,
        meta: ModelMeta,
    ) -> Result<Model> {
        let name = Name::new(&def.name);

        let kind = if def.abstract_model {
            ModelKind::Abstract
        } else {
            let table_name = def
                .table_name
                .clone()
                .unwrap_or_else(|| pluralize(&name.lowered()));
            ModelKind::Concrete(ModelConcrete {
                table_name,
                table: TableId::placeholder(),
            })
        };

        let mut fields = Vec::with_capacity(merged.len());
        for (index, merged_field) in merged.values().enumerate() {
            fields.push(self.materialize_field(id, index, merged_field, &def.name)?);
        }

        Ok(Model {
            id,
            name,
            kind,
            fields,
            meta,
        })
    }

    fn materialize_field(
        &self,
        model: ModelId,
        index: usize,
        merged_field: &MergedField,
        model_name: &str,
    ) -> Result<Field> {
        let def = &merged_field.def;

        let ty = match &def.ty {
            FieldTyDef::Scalar(scalar) => FieldTy::Scalar(*scalar),
            FieldTyDef::ForeignKey(fk) => {
                let target = self.lookup_target(&fk.target, model_name, &def.name)?;
                FieldTy::ForeignKey(ForeignKey {
                    target,
                    related_name: fk.related_name.clone(),
                    pair: None,
                })
            }
            FieldTyDef::ManyToMany(m2m) => {
                let target = self.lookup_target(&m2m.target, model_name, &def.name)?;
                FieldTy::ManyToMany(ManyToMany {
                    target,
                    related_name: m2m.related_name.clone(),
                    through: m2m.through.clone(),
                    pair: None,
                })
            }
        };

        let auto_increment = def.auto_increment.unwrap_or_else(|| {
            def.primary_key && matches!(&def.ty, FieldTyDef::Scalar(scalar) if scalar.is_integer())
        });

        Ok(Field {
            id: FieldId { model, index },
            name: FieldName {
                app_name: def.name.clone(),
                storage_name: def.column_name.clone(),
            },
            ty,
            nullable: def.nullable,
            primary_key: def.primary_key,
            unique: def.unique,
            auto_increment,
            default: def.default.clone(),
            max_length: def.max_length,
            origin: merged_field.origin,
        })
    }

    fn lookup_target(&self, target: &str, model_name: &str, field_name: &str) -> Result<ModelId> {
        self.ids.get(target).copied().ok_or_else(|| {
            err!("field `{model_name}.{field_name}` references unknown model `{target}`")
        })
    }
}
