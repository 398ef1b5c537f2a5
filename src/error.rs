use thiserror::Error;

/// Errors produced while editing, validating, or exchanging range documents.
///
/// None of these are fatal: every variant leaves the caller's editing state as it was before the
/// failed operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// An index or position outside its domain.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A document or cell fails an invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A raise amount below the minimum raise, or an unparsable amount.
    #[error("Illegal raise: {0}")]
    IllegalRaise(String),

    /// Transport or server failure while talking to the range store.
    #[error("Network error: {0}")]
    Network(String),

    /// The requested range does not exist or could not be decoded.
    #[error("Range not found: {0}")]
    NotFound(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A hand or position label could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Binary export or import failure.
    #[error("File error: {0}")]
    File(String),
}

/// Shorthand for results carrying a [`RangeError`].
pub type RangeResult<T> = Result<T, RangeError>;
