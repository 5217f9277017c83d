//! Orchestration layer for itemdb.
//!
//! [`ItemsService`] composes the OTB codec, the items.xml codec, and the
//! sync engine into the load/save/sync entry points a UI or CLI consumes.
//! It owns at most one loaded database at a time; loading replaces the
//! session, unloading drops it, and everything else requires one.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::{ItemsService, LoadReport, LoadRequest, SavedFiles, DEFAULT_SERVER};
