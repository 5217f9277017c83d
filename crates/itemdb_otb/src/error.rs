//! Error types for the OTB codec.

use thiserror::Error;

/// Result type for OTB codec operations.
pub type OtbResult<T> = Result<T, OtbError>;

/// Errors that can occur while reading or writing an OTB buffer.
///
/// Every reader error is fatal: a malformed node stream never yields a
/// partial item list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OtbError {
    /// The buffer ended inside a node or attribute.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof {
        /// Byte offset where more input was required.
        offset: usize,
    },

    /// The fixed 4-byte zero header is missing or non-zero.
    #[error("invalid OTB header")]
    InvalidHeader,

    /// A node delimiter appeared where it is not allowed.
    #[error("unexpected byte 0x{byte:02X} at offset {offset}")]
    UnexpectedByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        offset: usize,
    },

    /// Data remained after the root node was closed.
    #[error("trailing data after root node at offset {offset}")]
    TrailingData {
        /// Offset of the first trailing byte.
        offset: usize,
    },

    /// The VERSION attribute length was not 140.
    #[error("version attribute length must be 140, got {length}")]
    BadVersionLength {
        /// The length that was read.
        length: u16,
    },

    /// A known attribute carried an impossible payload length.
    #[error("attribute 0x{id:02X} has invalid length {length}")]
    InvalidAttributeLength {
        /// Attribute id.
        id: u8,
        /// The length that was read.
        length: u16,
    },

    /// An item node used an unknown group code.
    #[error("unknown item group code {group}")]
    UnknownGroup {
        /// The group byte that was read.
        group: u8,
    },

    /// A stack order attribute held an undefined value.
    #[error("unknown stack order value {value}")]
    UnknownStackOrder {
        /// The byte that was read.
        value: u8,
    },

    /// An item name was not valid UTF-8.
    #[error("item name is not valid UTF-8")]
    NameNotUtf8,

    /// A value did not fit its wire representation on write.
    #[error("value too large for attribute 0x{id:02X}: {length} bytes")]
    AttributeTooLong {
        /// Attribute id.
        id: u8,
        /// Attempted payload length.
        length: usize,
    },

    /// Item list constraint violated while building the result.
    #[error(transparent)]
    Core(#[from] itemdb_core::CoreError),
}
