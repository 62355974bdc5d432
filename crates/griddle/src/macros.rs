/// Returns early with a [`ConfigurationError`] built from format arguments.
///
/// [`ConfigurationError`]: crate::ConfigurationError
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::ConfigurationError::msg(format!($($arg)*)))
    };
}

/// Creates a [`ConfigurationError`] from format arguments.
///
/// [`ConfigurationError`]: crate::ConfigurationError
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::ConfigurationError::msg(format!($($arg)*))
    };
}
