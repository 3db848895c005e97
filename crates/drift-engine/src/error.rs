//! Error types for the engine crate.

/// Errors that can occur while setting up a comparison.
///
/// Comparison itself is total: once options validate, it cannot fail for
/// any input pair.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The supplied options are not a usable configuration.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
