//! OTB buffer to item list.

use crate::attribute::{attr_id, type_from_group, VERSION_ATTR_LENGTH};
use crate::error::{OtbError, OtbResult};
use crate::flags::apply_flags;
use crate::node::{parse_tree, Node, PayloadReader};
use itemdb_core::{ServerItem, ServerItemList, ServerItemType, StackOrder};

/// Reads a whole OTB buffer into a [`ServerItemList`].
///
/// Unknown item attributes are skipped by their declared length; any
/// structural problem is fatal and no partial list is returned.
pub fn read_server_items(data: &[u8]) -> OtbResult<ServerItemList> {
    let root = parse_tree(data)?;
    let mut list = ServerItemList::new();

    read_root_payload(&root, &mut list)?;
    for child in &root.children {
        let item = read_item_node(child)?;
        list.add(item)?;
    }
    Ok(list)
}

fn read_root_payload(root: &Node, list: &mut ServerItemList) -> OtbResult<()> {
    let mut reader = PayloadReader::new(&root.payload);
    let _node_type = reader.read_u8()?;
    let _root_flags = reader.read_u32()?;

    while !reader.is_empty() {
        let id = reader.read_u8()?;
        let length = reader.read_u16()?;
        if id == attr_id::VERSION {
            if length != VERSION_ATTR_LENGTH {
                return Err(OtbError::BadVersionLength { length });
            }
            list.major_version = reader.read_u32()?;
            list.minor_version = reader.read_u32()?;
            list.build_number = reader.read_u32()?;
            // The 128-byte CSD string repeats the versions in text form;
            // the binary fields are authoritative.
            let _csd = reader.read_bytes(128)?;
            // The OTB minor version tracks the client data version.
            list.client_version = list.minor_version;
        } else {
            reader.read_bytes(usize::from(length))?;
        }
    }
    Ok(())
}

fn read_item_node(node: &Node) -> OtbResult<ServerItem> {
    let mut reader = PayloadReader::new(&node.payload);

    let group = reader.read_u8()?;
    let item_type = type_from_group(group).ok_or(OtbError::UnknownGroup { group })?;
    let flags = reader.read_u32()?;

    let mut item = ServerItem {
        item_type,
        ..ServerItem::default()
    };
    apply_flags(&mut item, flags);

    while !reader.is_empty() {
        let id = reader.read_u8()?;
        let length = reader.read_u16()?;
        read_item_attribute(&mut item, &mut reader, id, length)?;
    }

    if item.is_deprecated() {
        // Deprecated items are retained by server id only.
        item.client_id = 0;
        item.sprite_hash = None;
    } else {
        item.ensure_sprite_hash();
    }
    Ok(item)
}

fn read_item_attribute(
    item: &mut ServerItem,
    reader: &mut PayloadReader<'_>,
    id: u8,
    length: u16,
) -> OtbResult<()> {
    let expect = |expected: u16| {
        if length == expected {
            Ok(())
        } else {
            Err(OtbError::InvalidAttributeLength { id, length })
        }
    };

    match id {
        attr_id::SERVER_ID => {
            expect(2)?;
            item.id = reader.read_u16()?;
        }
        attr_id::CLIENT_ID => {
            expect(2)?;
            item.client_id = reader.read_u16()?;
        }
        attr_id::NAME => {
            let bytes = reader.read_bytes(usize::from(length))?;
            item.name = std::str::from_utf8(bytes)
                .map_err(|_| OtbError::NameNotUtf8)?
                .to_string();
        }
        attr_id::GROUND_SPEED => {
            expect(2)?;
            item.ground_speed = reader.read_u16()?;
        }
        attr_id::SPRITE_HASH => {
            expect(16)?;
            let bytes = reader.read_bytes(16)?;
            let mut hash = [0u8; 16];
            hash.copy_from_slice(bytes);
            item.sprite_hash = Some(hash);
        }
        attr_id::MINIMAP_COLOR => {
            expect(2)?;
            item.minimap_color = reader.read_u16()?;
        }
        attr_id::MAX_READ_WRITE_CHARS => {
            expect(2)?;
            item.max_read_write_chars = reader.read_u16()?;
        }
        attr_id::MAX_READ_CHARS => {
            expect(2)?;
            item.max_read_chars = reader.read_u16()?;
        }
        attr_id::LIGHT => {
            expect(4)?;
            item.light_level = reader.read_u16()?;
            item.light_color = reader.read_u16()?;
        }
        attr_id::STACK_ORDER => {
            expect(1)?;
            let value = reader.read_u8()?;
            item.stack_order =
                StackOrder::from_u8(value).ok_or(OtbError::UnknownStackOrder { value })?;
            item.has_stack_order = item.stack_order != StackOrder::None;
        }
        attr_id::TRADE_AS => {
            expect(2)?;
            item.trade_as = reader.read_u16()?;
        }
        _ => {
            // Forward-compatible: skip unknown attributes by length.
            reader.read_bytes(usize::from(length))?;
        }
    }
    Ok(())
}
