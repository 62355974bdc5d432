use super::BuildSchema;
use crate::schema::app::{FieldTy, Model, ModelId, ModelKind, RelationKind, ScalarType};
use crate::schema::db::{Column, ColumnId, ForeignKey, Index, IndexId};
use crate::Result;
use std::collections::HashSet;

impl BuildSchema<'_> {
    /// Lower every concrete model, then every many-to-many edge, to
    /// physical tables.
    ///
    /// Runs in passes: table ids are reserved for all models first so
    /// foreign keys can reference tables populated later, then columns and
    /// indices, then foreign-key constraints, then through tables.
    pub(super) fn build_tables(&mut self) -> Result<()> {
        let model_ids: Vec<ModelId> = self.models.keys().copied().collect();

        for &id in &model_ids {
            let logical = match &self.models[&id].kind {
                ModelKind::Concrete(concrete) => concrete.table_name.clone(),
                ModelKind::Abstract => continue,
            };

            let name = self.physical_table_name(&logical);
            let table_id = self.register_table(name)?;

            if let ModelKind::Concrete(concrete) =
                &mut self.models.get_mut(&id).expect("model resolved").kind
            {
                concrete.table = table_id;
            }
        }

        for &id in &model_ids {
            if self.models[&id].is_concrete() {
                self.populate_columns(id)?;
            }
        }

        for &id in &model_ids {
            if self.models[&id].is_concrete() {
                self.populate_foreign_keys(id);
            }
        }

        self.build_through_tables()?;

        Ok(())
    }

    /// Columns, primary key, and unique indices for one model's table.
    /// Column order follows field declaration/merge order; relation fields
    /// without columns are skipped.
    fn populate_columns(&mut self, id: ModelId) -> Result<()> {
        let model = &self.models[&id];
        let table_id = model.table().expect("concrete model has a table id");

        let mut columns: Vec<Column> = vec![];
        let mut indices: Vec<Index> = vec![];
        let mut pk_columns: Vec<ColumnId> = vec![];
        let mut seen: HashSet<String> = HashSet::new();

        for field in &model.fields {
            let ty = match &field.ty {
                FieldTy::Scalar(scalar) => *scalar,
                FieldTy::ForeignKey(fk) => relation_column_ty(&self.models[&fk.target])?,
                FieldTy::ManyToMany(_) | FieldTy::HasMany(_) => continue,
            };

            let name = field.column_name().to_string();
            if !seen.insert(name.clone()) {
                bail!(
                    "model `{}` maps two fields to the same column name `{}`",
                    model.name.upper_camel_case(),
                    name
                );
            }

            let column_id = ColumnId {
                table: table_id,
                index: columns.len(),
            };

            if field.primary_key {
                pk_columns.push(column_id);
            }

            if field.unique {
                indices.push(Index {
                    id: IndexId {
                        table: table_id,
                        index: indices.len(),
                    },
                    name: unique_index_name(&self.tables[table_id.0].name, &[name.as_str()]),
                    columns: vec![column_id],
                    unique: true,
                });
            }

            columns.push(Column {
                id: column_id,
                name,
                ty,
                nullable: field.nullable,
                primary_key: field.primary_key,
                auto_increment: field.auto_increment,
                max_length: field.max_length,
                default: field.default.as_ref().and_then(|d| d.as_value()).cloned(),
            });
        }

        for constraint in &model.meta.constraints {
            let constraint_columns: Vec<ColumnId> = constraint
                .column_names()
                .iter()
                .map(|column_name| {
                    columns
                        .iter()
                        .find(|column| &column.name == column_name)
                        .map(|column| column.id)
                        .expect("constraint columns are validated during resolution")
                })
                .collect();

            let names: Vec<&str> = constraint
                .column_names()
                .iter()
                .map(String::as_str)
                .collect();

            indices.push(Index {
                id: IndexId {
                    table: table_id,
                    index: indices.len(),
                },
                name: unique_index_name(&self.tables[table_id.0].name, &names),
                columns: constraint_columns,
                unique: true,
            });
        }

        let table = &mut self.tables[table_id.0];
        table.columns = columns;
        table.primary_key.columns = pk_columns;
        table.indices = indices;

        Ok(())
    }

    /// Foreign-key constraints for one model's table. Targets are fully
    /// populated by the time this pass runs.
    fn populate_foreign_keys(&mut self, id: ModelId) {
        let model = &self.models[&id];
        let table_id = model.table().expect("concrete model has a table id");

        let mut foreign_keys: Vec<ForeignKey> = vec![];
        let mut column_index = 0usize;

        for field in &model.fields {
            match &field.ty {
                FieldTy::Scalar(_) => column_index += 1,
                FieldTy::ForeignKey(fk) => {
                    let target_table = self.models[&fk.target]
                        .table()
                        .expect("relation targets are concrete");
                    let target_column = self.tables[target_table.0].primary_key.columns[0];

                    foreign_keys.push(ForeignKey {
                        column: ColumnId {
                            table: table_id,
                            index: column_index,
                        },
                        target_table,
                        target_column,
                    });
                    column_index += 1;
                }
                FieldTy::ManyToMany(_) | FieldTy::HasMany(_) => {}
            }
        }

        self.tables[table_id.0].foreign_keys = foreign_keys;
    }

    /// One through table per many-to-many edge: an auto-increment `id`
    /// primary key, one foreign-key column per side named by each side's
    /// lowered model name, and a composite unique index over the pair.
    fn build_through_tables(&mut self) -> Result<()> {
        for edge_index in 0..self.relations.len() {
            if self.relations[edge_index].kind != RelationKind::ManyToMany {
                continue;
            }

            let from = self.relations[edge_index].from;
            let to = self.relations[edge_index].to;
            let field_name = self.relations[edge_index].field_name.clone();

            let source = &self.models[&from];
            let target = &self.models[&to];

            let through_override = source
                .field_by_name(&field_name)
                .and_then(|field| field.ty.as_many_to_many())
                .and_then(|m2m| m2m.through.clone());

            let logical = through_override.unwrap_or_else(|| {
                format!(
                    "{}_{}",
                    source.table_name().expect("relation sources are concrete"),
                    target.table_name().expect("relation targets are concrete"),
                )
            });

            let source_column = source.name.lowered();
            let target_column = target.name.lowered();
            let source_ty = relation_column_ty(source)?;
            let target_ty = relation_column_ty(target)?;
            let source_table = source.table().expect("relation sources are concrete");
            let target_table = target.table().expect("relation targets are concrete");
            let source_pk = self.tables[source_table.0].primary_key.columns[0];
            let target_pk = self.tables[target_table.0].primary_key.columns[0];
            let model_name = source.name.upper_camel_case();

            let name = self.physical_table_name(&logical);
            let table_id = self.register_table(name)?;

            if source_column == target_column {
                bail!(
                    "through table `{}` for `{}.{}` maps both sides to the \
                     same column name `{}`",
                    logical,
                    model_name,
                    field_name,
                    source_column
                );
            }

            let id_column = ColumnId {
                table: table_id,
                index: 0,
            };
            let source_fk_column = ColumnId {
                table: table_id,
                index: 1,
            };
            let target_fk_column = ColumnId {
                table: table_id,
                index: 2,
            };

            let table = &mut self.tables[table_id.0];

            table.columns = vec![
                Column {
                    id: id_column,
                    name: "id".to_string(),
                    ty: ScalarType::Integer,
                    nullable: false,
                    primary_key: true,
                    auto_increment: true,
                    max_length: None,
                    default: None,
                },
                Column {
                    id: source_fk_column,
                    name: source_column.clone(),
                    ty: source_ty,
                    nullable: false,
                    primary_key: false,
                    auto_increment: false,
                    max_length: None,
                    default: None,
                },
                Column {
                    id: target_fk_column,
                    name: target_column.clone(),
                    ty: target_ty,
                    nullable: false,
                    primary_key: false,
                    auto_increment: false,
                    max_length: None,
                    default: None,
                },
            ];
            table.primary_key.columns = vec![id_column];
            table.indices = vec![Index {
                id: IndexId {
                    table: table_id,
                    index: 0,
                },
                name: unique_index_name(&table.name, &[source_column.as_str(), target_column.as_str()]),
                columns: vec![source_fk_column, target_fk_column],
                unique: true,
            }];
            table.foreign_keys = vec![
                ForeignKey {
                    column: source_fk_column,
                    target_table: source_table,
                    target_column: source_pk,
                },
                ForeignKey {
                    column: target_fk_column,
                    target_table,
                    target_column: target_pk,
                },
            ];

            self.relations[edge_index].through = Some(table_id);
        }

        Ok(())
    }
}

/// The column type a relation to `target` lowers to: the scalar type of the
/// target's primary key.
fn relation_column_ty(target: &Model) -> Result<ScalarType> {
    let pk = target
        .primary_key()
        .expect("concrete models have a primary key");

    match pk.ty.as_scalar() {
        Some(scalar) => Ok(scalar),
        None => bail!(
            "primary key of `{}` must be a scalar field to be referenced by \
             a relation",
            target.name.upper_camel_case()
        ),
    }
}

fn unique_index_name(table: &str, columns: &[&str]) -> String {
    let mut name = format!("uq_{table}");
    for column in columns {
        name.push('_');
        name.push_str(column);
    }
    name
}
