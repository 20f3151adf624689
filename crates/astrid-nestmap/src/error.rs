//! Nested map error types.

use thiserror::Error;

/// Errors from nested map operations.
///
/// Most operations are total. Only strict lookups, strict key normalization
/// and format export can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestError {
    /// A strict lookup could not resolve its path.
    #[error("path not found: {path}")]
    NotFound {
        /// Dotted rendering of the unresolved remainder of the path.
        path: String,
    },

    /// Strict key normalization met a name with no registered symbol.
    #[error("unknown symbol: '{name}'")]
    UnknownSymbol {
        /// The text key that has no symbol.
        name: String,
    },

    /// Export met a key the target format cannot carry.
    #[error("unsupported key for export: {key}")]
    UnsupportedKey {
        /// Rendering of the offending key.
        key: String,
    },

    /// Export met a value the target format cannot carry.
    #[error("unsupported value for export: {message}")]
    UnsupportedValue {
        /// Description of the offending value.
        message: String,
    },
}

/// Result type for nested map operations.
pub type NestResult<T> = Result<T, NestError>;
