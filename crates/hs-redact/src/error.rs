//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for sanitizer operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;

/// Errors that can occur while sanitizing a HAR capture.
///
/// All failures are local, synchronous, and non-retryable; the engine never
/// retries I/O and never swallows an error. Mapping these onto user-facing
/// responses is the adapter's job.
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// The input was not a usable HAR document. Raised for text that is not
    /// JSON (the parse error is carried in the message) and for trees that
    /// lack `log.entries[0].request`.
    #[error("invalid HAR document: {0}")]
    InvalidDocument(String),

    /// Caller-supplied scrub options were malformed: a non-string wordlist
    /// entry, or an unknown category name.
    #[error("invalid scrub spec: {0}")]
    InvalidSpec(String),

    /// A wordlist resource was missing, unreadable, or malformed.
    #[error("wordlist error: {0}")]
    Wordlist(String),

    /// The operation is outside the engine's contract.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
