//! Error types for pipeline assembly and the write path.
//!
//! The crate keeps two failure notions strictly apart: a read that cannot
//! resolve a value yields `None` (absence is a value, not an error), while
//! misusing the write path raises one of the typed errors below immediately
//! at the call site. Nothing is retried or recovered internally.

use thiserror::Error;

use crate::value::SourceShape;

/// Errors raised while assembling a composition chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A pipeline needs at least one step to be meaningful.
    #[error("cannot compose an empty chain of functions")]
    EmptyChain,
}

/// Write-path misuse errors for property updates and record encoding.
///
/// Read operations never produce these; a read against an unsupported
/// shape simply yields absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The target value is neither a mapping nor a record.
    #[error("cannot write properties on a {0} value")]
    UnsupportedShape(SourceShape),

    /// The property name is not usable for the target shape, e.g. a
    /// purely numeric name against a record.
    #[error("'{name}' is not a valid field name for a {shape} value")]
    InvalidName { name: String, shape: SourceShape },
}

/// Result alias for write-path operations.
pub type ShapeResult<T> = Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ShapeError::UnsupportedShape(SourceShape::Other);
        assert_eq!(err.to_string(), "cannot write properties on a scalar value");

        let err = ShapeError::InvalidName {
            name: "42".to_string(),
            shape: SourceShape::Record,
        };
        assert_eq!(
            err.to_string(),
            "'42' is not a valid field name for a record value"
        );

        assert_eq!(
            ComposeError::EmptyChain.to_string(),
            "cannot compose an empty chain of functions"
        );
    }
}
