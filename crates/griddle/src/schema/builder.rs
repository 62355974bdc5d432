mod relation;
mod resolve;
mod table;

use resolve::MergedField;

use super::{app, db, Schema};
use crate::schema::app::{ModelId, RelationEdge};
use crate::schema::db::TableId;
use crate::schema::def::ModelDef;
use crate::Result;
use indexmap::IndexMap;

/// Builds a [`Schema`] from registered model declarations.
///
/// Declarations are collected with [`register`] and nothing is resolved
/// until [`build`] runs. `build` consumes the builder and either completes
/// every phase (field resolution, relation wiring, table lowering,
/// verification) or returns a [`ConfigurationError`] with no partial
/// schema left behind.
///
/// [`register`]: Builder::register
/// [`build`]: Builder::build
/// [`ConfigurationError`]: crate::ConfigurationError
#[derive(Debug, Default)]
pub struct Builder {
    /// If set, prefix all physical table names with this string
    table_name_prefix: Option<String>,

    /// Registered declarations, in registration order
    defs: Vec<ModelDef>,
}

/// Used to track state during the build process.
struct BuildSchema<'a> {
    builder: &'a Builder,

    /// Declarations being resolved
    defs: &'a [ModelDef],

    /// Model ids by declared name, assigned before resolution starts
    ids: IndexMap<String, ModelId>,

    /// Resolved models; grows in registration order during field resolution
    models: IndexMap<ModelId, app::Model>,

    /// Merged field declarations per model, each with the model that
    /// declared it. Children pull from here so overrides propagate down
    /// multi-level chains.
    merged: IndexMap<ModelId, IndexMap<String, MergedField>>,

    /// Ancestor chains (model bases only), root-first, per model
    chains: IndexMap<ModelId, Vec<ModelId>>,

    /// Maps physical table names to identifiers
    table_lookup: IndexMap<String, TableId>,

    /// Tables as they are built
    tables: Vec<db::Table>,

    /// Relation edges, in wiring order
    relations: Vec<RelationEdge>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every physical table name with `prefix`.
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Register a model declaration. Bases must be registered before the
    /// models that inherit from them.
    pub fn register(&mut self, def: ModelDef) -> &mut Self {
        self.defs.push(def);
        self
    }

    /// Resolve every registered declaration into an immutable [`Schema`].
    pub fn build(self) -> Result<Schema> {
        let mut ids = IndexMap::new();
        for (index, def) in self.defs.iter().enumerate() {
            if ids.insert(def.name.clone(), ModelId(index)).is_some() {
                bail!("duplicate model name `{}`", def.name);
            }
        }

        let mut build = BuildSchema {
            builder: &self,
            defs: &self.defs,
            ids,
            models: IndexMap::new(),
            merged: IndexMap::new(),
            chains: IndexMap::new(),
            table_lookup: IndexMap::new(),
            tables: vec![],
            relations: vec![],
        };

        tracing::debug!(models = build.defs.len(), "resolving model fields");
        build.resolve_models()?;

        tracing::debug!("wiring relations");
        build.wire_relations()?;

        tracing::debug!("building tables");
        build.build_tables()?;

        let schema = Schema {
            app: app::Schema {
                models: build.models,
            },
            db: db::Schema {
                tables: build.tables,
            },
            relations: build.relations,
        };

        schema.verify()?;

        Ok(schema)
    }
}

impl BuildSchema<'_> {
    fn physical_table_name(&self, logical: &str) -> String {
        if let Some(prefix) = &self.builder.table_name_prefix {
            format!("{prefix}{logical}")
        } else {
            logical.to_string()
        }
    }

    fn register_table(&mut self, name: String) -> Result<TableId> {
        if self.table_lookup.contains_key(&name) {
            bail!("duplicate table name `{name}`");
        }
        let id = TableId(self.tables.len());
        self.table_lookup.insert(name.clone(), id);
        self.tables.push(db::Table::new(id, name));
        Ok(id)
    }
}
