//! Error types

/// Boxed error produced by a schema engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can escape a validation call.
///
/// Reported issues are not errors: they are the expected negative outcome and
/// end up in the form's error map. These variants cover the engine itself
/// failing to produce an outcome.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The engine failed with a plain message.
    #[error("Schema engine failed: {0}")]
    Engine(String),

    /// The engine failed with an underlying error.
    #[error("Schema engine failed: {0}")]
    Source(#[source] BoxError),

    /// The engine returned a result that could not be decoded.
    #[error("Malformed schema result: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ValidationError {
    /// Creates an engine failure from a message.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    /// Wraps an arbitrary error raised by the engine.
    pub fn from_source(err: impl Into<BoxError>) -> Self {
        Self::Source(err.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_from_source_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "engine timed out");
        let err = ValidationError::from_source(io);

        assert_eq!(err.to_string(), "Schema engine failed: engine timed out");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_engine_display() {
        assert_eq!(ValidationError::engine("boom").to_string(), "Schema engine failed: boom");
    }
}
