//! # itemdb Core
//!
//! Core data model for itemdb.
//!
//! This crate provides:
//! - `ServerItem`: one server-side item definition with its capability flags
//! - `ServerItemList`: the in-memory collection with id and clientId indices
//! - Attribute schemas: eight compiled-in items.xml dialect definitions with
//!   a query API
//!
//! The model is deliberately synchronous and self-contained: file formats
//! live in `itemdb_otb` and `itemdb_xml`, reconciliation in `itemdb_sync`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod item;
mod list;
pub mod schema;

pub use error::{CoreError, CoreResult};
pub use item::{ServerItem, ServerItemType, StackOrder, XmlAttributeValue};
pub use list::ServerItemList;
