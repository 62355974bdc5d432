use std::fmt;

/// A literal value carried through schema metadata, such as a column
/// default.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// The default applied to a field when no value is supplied: either a
/// literal, or a factory invoked once per new row.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    Factory(fn() -> Value),
}

impl FieldDefault {
    /// The literal default, if this is not a factory.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Factory(_) => None,
        }
    }

    /// Produces the default for a new row.
    pub fn materialize(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => fmt.write_str("Factory(..)"),
        }
    }
}

impl From<Value> for FieldDefault {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
