//! Item list to OTB buffer.

use crate::attribute::{attr_id, group_from_type};
use crate::error::OtbResult;
use crate::flags::flags_from_item;
use crate::node::NodeWriter;
use itemdb_core::{ServerItem, ServerItemList};

/// Writes a [`ServerItemList`] into an OTB buffer.
///
/// Output is deterministic: the same list always produces identical bytes.
/// Items are emitted in ascending server id order with a fixed attribute
/// order per item.
pub fn write_server_items(list: &ServerItemList) -> OtbResult<Vec<u8>> {
    let mut writer = NodeWriter::new();

    writer.begin_node();
    writer.write_u8(0);
    writer.write_u32(0);
    writer.write_attribute(attr_id::VERSION, &version_payload(list))?;

    for item in list.items() {
        write_item_node(&mut writer, item)?;
    }

    writer.end_node();
    Ok(writer.into_bytes())
}

/// Builds the 140-byte VERSION payload: three u32 fields plus the zero
/// padded CSD description string.
fn version_payload(list: &ServerItemList) -> Vec<u8> {
    let mut payload = Vec::with_capacity(140);
    payload.extend_from_slice(&list.major_version.to_le_bytes());
    payload.extend_from_slice(&list.minor_version.to_le_bytes());
    payload.extend_from_slice(&list.build_number.to_le_bytes());

    let csd = format!(
        "OTB {}.{}.{}-{}.{}",
        list.major_version,
        list.minor_version,
        list.build_number,
        list.client_version / 100,
        list.client_version % 100
    );
    let mut csd_bytes = csd.into_bytes();
    csd_bytes.truncate(128);
    csd_bytes.resize(128, 0);
    payload.extend_from_slice(&csd_bytes);
    payload
}

fn write_item_node(writer: &mut NodeWriter, item: &ServerItem) -> OtbResult<()> {
    writer.begin_node();
    writer.write_u8(group_from_type(item.item_type));
    writer.write_u32(flags_from_item(item));

    writer.write_attribute(attr_id::SERVER_ID, &item.id.to_le_bytes())?;

    // Deprecated items are retained by server id only.
    if item.is_deprecated() {
        writer.end_node();
        return Ok(());
    }

    writer.write_attribute(attr_id::CLIENT_ID, &item.client_id.to_le_bytes())?;

    if !item.name.is_empty() {
        writer.write_attribute(attr_id::NAME, item.name.as_bytes())?;
    }
    if item.ground_speed != 0 {
        writer.write_attribute(attr_id::GROUND_SPEED, &item.ground_speed.to_le_bytes())?;
    }

    let hash = item.sprite_hash.unwrap_or([0u8; 16]);
    writer.write_attribute(attr_id::SPRITE_HASH, &hash)?;

    if item.minimap_color != 0 {
        writer.write_attribute(attr_id::MINIMAP_COLOR, &item.minimap_color.to_le_bytes())?;
    }
    if item.max_read_write_chars != 0 {
        writer.write_attribute(
            attr_id::MAX_READ_WRITE_CHARS,
            &item.max_read_write_chars.to_le_bytes(),
        )?;
    }
    if item.max_read_chars != 0 {
        writer.write_attribute(attr_id::MAX_READ_CHARS, &item.max_read_chars.to_le_bytes())?;
    }
    if item.light_level != 0 || item.light_color != 0 {
        let mut light = Vec::with_capacity(4);
        light.extend_from_slice(&item.light_level.to_le_bytes());
        light.extend_from_slice(&item.light_color.to_le_bytes());
        writer.write_attribute(attr_id::LIGHT, &light)?;
    }
    if item.has_stack_order {
        writer.write_attribute(attr_id::STACK_ORDER, &[item.stack_order.as_u8()])?;
    }
    if item.trade_as != 0 {
        writer.write_attribute(attr_id::TRADE_AS, &item.trade_as.to_le_bytes())?;
    }

    writer.end_node();
    Ok(())
}
