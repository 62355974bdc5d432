use super::BuildSchema;
use crate::schema::app::{
    Field, FieldId, FieldName, FieldTy, HasMany, ModelId, RelationEdge, RelationKind,
};
use crate::schema::pluralize;
use crate::Result;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A relation discovered during resolution, before its reverse name is
/// final.
struct RelationIntent {
    source: ModelId,
    field_index: usize,
    field_name: String,
    target: ModelId,
    kind: RelationKind,

    /// `related_name` as declared, if any
    explicit: Option<String>,

    /// True when the field definition came from an abstract ancestor
    inherited: bool,

    /// The reverse-accessor name; starts as the candidate and may gain a
    /// table-name suffix
    reverse_name: String,
}

impl BuildSchema<'_> {
    /// Establish every relation edge and install reverse accessors on the
    /// target models.
    pub(super) fn wire_relations(&mut self) -> Result<()> {
        let mut intents = self.collect_intents()?;
        self.assign_reverse_names(&mut intents)?;
        self.inject_reverse_fields(intents);
        Ok(())
    }

    /// Gather relation intents from every concrete model, in registration
    /// order. Relations declared on abstract models register nothing
    /// themselves; each concrete descendant carries its own copy.
    fn collect_intents(&self) -> Result<Vec<RelationIntent>> {
        let mut intents = vec![];

        for model in self.models.values() {
            if model.is_abstract() {
                continue;
            }

            for (field_index, field) in model.fields.iter().enumerate() {
                let (target, explicit, kind) = match &field.ty {
                    FieldTy::ForeignKey(fk) => {
                        (fk.target, fk.related_name.clone(), RelationKind::ForeignKey)
                    }
                    FieldTy::ManyToMany(m2m) => (
                        m2m.target,
                        m2m.related_name.clone(),
                        RelationKind::ManyToMany,
                    ),
                    _ => continue,
                };

                let target_model = &self.models[&target];
                if target_model.is_abstract() {
                    bail!(
                        "field `{}.{}` targets abstract model `{}`; \
                         relations must point at concrete models",
                        model.name.upper_camel_case(),
                        field.name.app_name,
                        target_model.name.upper_camel_case()
                    );
                }

                let reverse_name = explicit
                    .clone()
                    .unwrap_or_else(|| pluralize(&model.name.lowered()));

                intents.push(RelationIntent {
                    source: model.id,
                    field_index,
                    field_name: field.name.app_name.clone(),
                    target,
                    kind,
                    explicit,
                    inherited: field.origin != model.id,
                    reverse_name,
                });
            }
        }

        Ok(intents)
    }

    /// Finalize reverse-accessor names.
    ///
    /// Candidates that collide on the same target are auto-adjusted with a
    /// `"_" + table_name` suffix only when every claimant is an inherited
    /// relation with an explicit `related_name` (sibling models inheriting
    /// the same declaration). Every other collision is an error, as is any
    /// name still ambiguous after adjustment.
    fn assign_reverse_names(&self, intents: &mut [RelationIntent]) -> Result<()> {
        let mut groups: IndexMap<(ModelId, String), Vec<usize>> = IndexMap::new();
        for (index, intent) in intents.iter().enumerate() {
            groups
                .entry((intent.target, intent.reverse_name.clone()))
                .or_default()
                .push(index);
        }

        for ((target, name), members) in &groups {
            if members.len() == 1 {
                continue;
            }

            let adjustable = members
                .iter()
                .all(|&index| intents[index].inherited && intents[index].explicit.is_some());

            if !adjustable {
                let claimants: Vec<String> = members
                    .iter()
                    .map(|&index| {
                        format!(
                            "`{}.{}`",
                            self.models[&intents[index].source].name.upper_camel_case(),
                            intents[index].field_name
                        )
                    })
                    .collect();
                bail!(
                    "reverse accessor `{}` on model `{}` is claimed by {}; \
                     set an explicit related_name",
                    name,
                    self.models[target].name.upper_camel_case(),
                    claimants.join(", ")
                );
            }

            for &index in members {
                let table_name = self.models[&intents[index].source]
                    .table_name()
                    .expect("relation sources are concrete")
                    .to_string();
                intents[index].reverse_name = format!("{name}_{table_name}");
            }
        }

        let mut seen: HashSet<(ModelId, &str)> = HashSet::new();
        for intent in intents.iter() {
            let target_model = &self.models[&intent.target];

            if target_model.field_by_name(&intent.reverse_name).is_some() {
                bail!(
                    "reverse accessor `{}` for `{}.{}` collides with a field \
                     declared on model `{}`",
                    intent.reverse_name,
                    self.models[&intent.source].name.upper_camel_case(),
                    intent.field_name,
                    target_model.name.upper_camel_case()
                );
            }

            if !seen.insert((intent.target, intent.reverse_name.as_str())) {
                bail!(
                    "reverse accessor `{}` on model `{}` is still ambiguous \
                     after table-name disambiguation",
                    intent.reverse_name,
                    target_model.name.upper_camel_case()
                );
            }
        }

        Ok(())
    }

    /// Append one reverse field per intent to its target model, link the
    /// owning field to its pair, and record the edge. This is the only
    /// mutation of a model after it resolves, and it is append-only.
    fn inject_reverse_fields(&mut self, intents: Vec<RelationIntent>) {
        for intent in intents {
            let pair = FieldId {
                model: intent.source,
                index: intent.field_index,
            };

            let target_model = self
                .models
                .get_mut(&intent.target)
                .expect("relation targets are resolved");
            let reverse_id = FieldId {
                model: intent.target,
                index: target_model.fields.len(),
            };

            target_model.fields.push(Field {
                id: reverse_id,
                name: FieldName {
                    app_name: intent.reverse_name.clone(),
                    storage_name: None,
                },
                ty: FieldTy::HasMany(HasMany {
                    target: intent.source,
                    pair,
                }),
                nullable: true,
                primary_key: false,
                unique: false,
                auto_increment: false,
                default: None,
                max_length: None,
                origin: intent.target,
            });

            let source_model = self
                .models
                .get_mut(&intent.source)
                .expect("relation sources are resolved");
            match &mut source_model.fields[intent.field_index].ty {
                FieldTy::ForeignKey(fk) => fk.pair = Some(reverse_id),
                FieldTy::ManyToMany(m2m) => m2m.pair = Some(reverse_id),
                _ => unreachable!("only relation fields produce intents"),
            }

            tracing::trace!(
                from = %self.models[&intent.source].name.upper_camel_case(),
                field = %intent.field_name,
                related_name = %intent.reverse_name,
                "wired relation"
            );

            self.relations.push(RelationEdge {
                from: intent.source,
                to: intent.target,
                kind: intent.kind,
                field_name: intent.field_name,
                related_name: intent.reverse_name,
                through: None,
            });
        }
    }
}
