//! Service-level errors.

use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the items service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An operation needed a loaded database but none is loaded.
    #[error("no server item database is loaded")]
    NotLoaded,

    /// The requested attribute server dialect is not known.
    #[error("unknown attribute server '{name}'")]
    UnknownServer {
        /// The requested dialect name.
        name: String,
    },

    /// The OTB codec rejected the data.
    #[error(transparent)]
    Otb(#[from] itemdb_otb::OtbError),

    /// The items.xml codec rejected the data.
    #[error(transparent)]
    Xml(#[from] itemdb_xml::XmlError),

    /// An item store operation failed.
    #[error(transparent)]
    Core(#[from] itemdb_core::CoreError),
}

impl ServiceError {
    /// Creates an unknown-server error.
    pub fn unknown_server(name: impl Into<String>) -> Self {
        Self::UnknownServer { name: name.into() }
    }
}
