#[macro_use]
mod macros;

mod error;
pub use error::ConfigurationError;

pub mod schema;
pub use schema::Schema;

mod value;
pub use value::{FieldDefault, Value};

/// A Result type alias that uses griddle's [`ConfigurationError`] type.
pub type Result<T> = core::result::Result<T, ConfigurationError>;
