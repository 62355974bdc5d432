use super::Constraint;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to the engine's schema registry. The resolver threads it
/// through to resolved models and never calls into it; identity is the
/// underlying allocation.
#[derive(Clone)]
pub struct SchemaHandle(Arc<dyn Any + Send + Sync>);

/// Opaque handle to the engine's connection provider. Same contract as
/// [`SchemaHandle`]: threaded through, never called.
#[derive(Clone)]
pub struct DatabaseHandle(Arc<dyn Any + Send + Sync>);

/// Meta attributes resolved for a model: the storage handle pair and any
/// model-level constraints.
#[derive(Debug, Clone, Default)]
pub struct ModelMeta {
    /// Schema registry handle; required on concrete models
    pub metadata: Option<SchemaHandle>,

    /// Connection handle; required on concrete models
    pub database: Option<DatabaseHandle>,

    /// Model-level constraints, validated against the merged column set
    pub constraints: Vec<Constraint>,
}

impl SchemaHandle {
    pub fn new(inner: impl Any + Send + Sync) -> Self {
        Self(Arc::new(inner))
    }

    /// True if both handles share the same underlying allocation.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl DatabaseHandle {
    pub fn new(inner: impl Any + Send + Sync) -> Self {
        Self(Arc::new(inner))
    }

    /// True if both handles share the same underlying allocation.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("SchemaHandle(..)")
    }
}

impl fmt::Debug for DatabaseHandle {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("DatabaseHandle(..)")
    }
}
