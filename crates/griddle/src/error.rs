/// An error raised when a set of model declarations cannot be resolved into
/// a schema.
///
/// This occurs when:
/// - A non-abstract model is used as a base class
/// - A non-abstract model ends its inheritance chain without both a schema
///   registry and a connection handle
/// - A constraint references a column absent from the merged column set
/// - Two fields lower to the same physical column name
/// - A reverse-relation name collides and cannot be auto-disambiguated
///
/// Resolution either completes fully or fails with this error; no partially
/// built schema is observable. The message carries the model and field or
/// constraint names needed to locate the fix.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid model configuration: {message}")]
pub struct ConfigurationError {
    message: Box<str>,
}

impl ConfigurationError {
    /// Creates a configuration error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into().into_boxed_str(),
        }
    }

    /// The detail message, without the `invalid model configuration` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
