//! # itemdb OTB
//!
//! Reader and writer for the OTB binary tree format storing server items.
//!
//! The format is a 4-byte zero header plus one node tree: nodes are
//! delimited by `0xFE`/`0xFF` with `0xFD` escaping payload bytes that
//! collide with the delimiters. The root node carries the format version;
//! each child node is one server item as a group byte, a flags bitset and a
//! sequence of TLV attributes.
//!
//! Guarantees:
//! - Reading a malformed stream fails with a typed [`OtbError`]; no partial
//!   list is ever produced.
//! - Unknown item attributes are skipped by length (forward compatible).
//! - Writing is deterministic: the same list produces identical bytes.
//!
//! ```
//! use itemdb_core::{ServerItem, ServerItemList, ServerItemType};
//! use itemdb_otb::{read_server_items, write_server_items};
//!
//! let mut list = ServerItemList::new();
//! let mut item = ServerItem::new(100, 200);
//! item.item_type = ServerItemType::Ground;
//! item.ground_speed = 150;
//! list.add(item).unwrap();
//!
//! let bytes = write_server_items(&list).unwrap();
//! let back = read_server_items(&bytes).unwrap();
//! assert_eq!(back.get_by_id(100).unwrap().ground_speed, 150);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod attribute;
mod error;
mod flags;
mod node;
mod read;
mod write;

pub use attribute::{attr_id, group, group_from_type, type_from_group, VERSION_ATTR_LENGTH};
pub use error::{OtbError, OtbResult};
pub use flags::{apply_flags, flags_from_item, ItemFlag};
pub use node::{Node, NodeWriter, PayloadReader, ESCAPE, NODE_END, NODE_START};
pub use read::read_server_items;
pub use write::write_server_items;
