//! items.xml codec for itemdb.
//!
//! Reads and writes the `items.xml` attribute overlay that OpenTibia
//! servers keep next to their binary item database. Reading applies
//! attributes onto an existing [`ServerItemList`](itemdb_core::ServerItemList)
//! and collects schema-aware diagnostics; writing renders the overlay
//! back deterministically, merging consecutive identical items into
//! `fromid`/`toid` ranges where the target dialect allows it.
//!
//! Only structurally broken XML is an error. Unknown attribute keys are
//! preserved on the items and surfaced through [`XmlReadReport`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod options;
mod reader;
mod writer;

pub use error::{XmlError, XmlResult};
pub use options::{XmlReadOptions, XmlWriteOptions};
pub use reader::{read_items_xml, XmlReadReport};
pub use writer::write_items_xml;
