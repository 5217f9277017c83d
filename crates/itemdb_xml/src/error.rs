//! Error types for the items.xml codec.

use thiserror::Error;

/// Result type for XML codec operations.
pub type XmlResult<T> = Result<T, XmlError>;

/// Errors that can occur while reading items.xml.
///
/// Only structurally broken XML is an error. Well-formed content with
/// unknown keys never fails; it is reported through the read report's
/// diagnostic lists instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The document is not well-formed XML or violates the items.xml shape.
    #[error("malformed items.xml: {message}")]
    Malformed {
        /// Description of the problem.
        message: String,
    },
}

impl XmlError {
    /// Creates a malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
