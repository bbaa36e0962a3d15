//! Error types for the expression crate.

/// Errors that can occur in the expression layer.
#[derive(Debug, thiserror::Error)]
pub enum ExprError {
    /// The expression text contains pattern characters but is not a
    /// compilable pattern.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Convenience alias for expression results.
pub type ExprResult<T> = Result<T, ExprError>;
