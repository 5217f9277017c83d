//! Server item entity.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The server-side item type.
///
/// This is a coarser classification than the client's appearance category:
/// it drives which OTB node group an item is written into and which fields
/// the sync engine projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ServerItemType {
    /// Ordinary item without a special group.
    #[default]
    None,
    /// Walkable ground tile (carries a ground speed).
    Ground,
    /// Container item.
    Container,
    /// Fluid container (vial, jug).
    Fluid,
    /// Splash (spilled fluid on the ground).
    Splash,
    /// Retained only by server id for compatibility; carries no other data.
    Deprecated,
}

impl fmt::Display for ServerItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Ground => "ground",
            Self::Container => "container",
            Self::Fluid => "fluid",
            Self::Splash => "splash",
            Self::Deprecated => "deprecated",
        };
        f.write_str(name)
    }
}

/// Tile stack rendering order.
///
/// The byte values are the ones persisted in the OTB `STACK_ORDER`
/// attribute; `Top` is 5 for compatibility with legacy editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum StackOrder {
    /// No explicit stack order.
    #[default]
    None = 0,
    /// Drawn as a ground border.
    Border = 1,
    /// Drawn at the bottom of the stack (ladders, open doors).
    Bottom = 2,
    /// Drawn on top of the stack.
    Top = 5,
}

impl StackOrder {
    /// Returns the persisted byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parses a persisted byte value.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Border),
            2 => Some(Self::Bottom),
            5 => Some(Self::Top),
            _ => None,
        }
    }
}

/// One items.xml attribute value on a server item.
///
/// A value is either a plain string or a nested record: the element's own
/// `value` (if any) plus its `<attribute>` children. Modelling this as a sum
/// type keeps the two shapes apart without runtime type inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlAttributeValue {
    /// A plain `key="..." value="..."` attribute.
    Leaf(String),
    /// An attribute element with child attributes.
    Nested {
        /// The element's own `value`, when present.
        parent_value: Option<String>,
        /// Child `key -> value` pairs.
        children: BTreeMap<String, String>,
    },
}

impl XmlAttributeValue {
    /// Creates a leaf value.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Returns the leaf string, if this is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            Self::Nested { .. } => None,
        }
    }
}

/// One server-visible item definition.
///
/// `id` is the server id (the unique key); `client_id` links to a client
/// appearance and is not unique — several server items may share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerItem {
    /// Server id, the unique key.
    pub id: u16,
    /// Client appearance id. Zero for deprecated items.
    pub client_id: u16,
    /// Server-side type group.
    pub item_type: ServerItemType,

    /// Blocks walking.
    pub unpassable: bool,
    /// Blocks missiles.
    pub block_missiles: bool,
    /// Blocks monster pathfinding.
    pub block_pathfinder: bool,
    /// Raises creatures standing on it.
    pub has_elevation: bool,
    /// Use happens immediately on click.
    pub force_use: bool,
    /// Use targets a second object.
    pub multi_use: bool,
    /// Can be picked up.
    pub pickupable: bool,
    /// Can be moved.
    pub movable: bool,
    /// Stacks into counted piles.
    pub stackable: bool,
    /// Can be read.
    pub readable: bool,
    /// Can be rotated.
    pub rotatable: bool,
    /// Can be hung on walls.
    pub hangable: bool,
    /// Hangs on south-facing walls.
    pub hook_south: bool,
    /// Hangs on east-facing walls.
    pub hook_east: bool,
    /// Uses client-side charge display.
    pub has_charges: bool,
    /// Excluded from look descriptions.
    pub ignore_look: bool,
    /// Text is readable from a distance.
    pub allow_distance_read: bool,
    /// Appearance is animated.
    pub is_animation: bool,
    /// Covers the whole tile as ground.
    pub full_ground: bool,

    /// Tile stack order.
    pub stack_order: StackOrder,
    /// Whether a stack order is set at all.
    pub has_stack_order: bool,

    /// Walking speed on this ground, 0 for non-ground.
    pub ground_speed: u16,
    /// Emitted light strength.
    pub light_level: u16,
    /// Emitted light color.
    pub light_color: u16,
    /// Maximum characters of a read-only text.
    pub max_read_chars: u16,
    /// Maximum characters of a writable text.
    pub max_read_write_chars: u16,
    /// Minimap color override.
    pub minimap_color: u16,
    /// Item id this trades as on the market.
    pub trade_as: u16,

    /// Item name.
    pub name: String,
    /// MD5 digest over the item's canonical sprite pixels.
    ///
    /// `None` only for deprecated items; all other items get a zeroed
    /// digest at load time when the OTB carries none.
    pub sprite_hash: Option<[u8; 16]>,

    /// items.xml attributes keyed by attribute name.
    pub xml_attributes: BTreeMap<String, XmlAttributeValue>,
}

impl ServerItem {
    /// Creates a new item with the given server id and client id.
    #[must_use]
    pub fn new(id: u16, client_id: u16) -> Self {
        Self {
            id,
            client_id,
            ..Self::default()
        }
    }

    /// Returns true if this item is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.item_type == ServerItemType::Deprecated
    }

    /// Ensures a non-deprecated item carries a sprite hash, filling in a
    /// zeroed digest when none was persisted.
    pub fn ensure_sprite_hash(&mut self) {
        if !self.is_deprecated() && self.sprite_hash.is_none() {
            self.sprite_hash = Some([0u8; 16]);
        }
    }
}

impl Default for ServerItem {
    fn default() -> Self {
        Self {
            id: 0,
            client_id: 0,
            item_type: ServerItemType::None,
            unpassable: false,
            block_missiles: false,
            block_pathfinder: false,
            has_elevation: false,
            force_use: false,
            multi_use: false,
            pickupable: false,
            // New items default to movable, matching the legacy editors.
            movable: true,
            stackable: false,
            readable: false,
            rotatable: false,
            hangable: false,
            hook_south: false,
            hook_east: false,
            has_charges: false,
            ignore_look: false,
            allow_distance_read: false,
            is_animation: false,
            full_ground: false,
            stack_order: StackOrder::None,
            has_stack_order: false,
            ground_speed: 0,
            light_level: 0,
            light_color: 0,
            max_read_chars: 0,
            max_read_write_chars: 0,
            minimap_color: 0,
            trade_as: 0,
            name: String::new(),
            sprite_hash: None,
            xml_attributes: BTreeMap::new(),
        }
    }
}

impl fmt::Display for ServerItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{} (client:{})", self.id, self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_defaults() {
        let item = ServerItem::new(100, 200);
        assert_eq!(item.id, 100);
        assert_eq!(item.client_id, 200);
        assert_eq!(item.item_type, ServerItemType::None);
        assert!(item.movable);
        assert!(!item.stackable);
        assert!(item.sprite_hash.is_none());
    }

    #[test]
    fn ensure_sprite_hash_fills_zeroes() {
        let mut item = ServerItem::new(1, 1);
        item.ensure_sprite_hash();
        assert_eq!(item.sprite_hash, Some([0u8; 16]));
    }

    #[test]
    fn ensure_sprite_hash_skips_deprecated() {
        let mut item = ServerItem::new(1, 0);
        item.item_type = ServerItemType::Deprecated;
        item.ensure_sprite_hash();
        assert!(item.sprite_hash.is_none());
    }

    #[test]
    fn stack_order_byte_roundtrip() {
        for order in [
            StackOrder::None,
            StackOrder::Border,
            StackOrder::Bottom,
            StackOrder::Top,
        ] {
            assert_eq!(StackOrder::from_u8(order.as_u8()), Some(order));
        }
        assert_eq!(StackOrder::from_u8(3), None);
    }

    #[test]
    fn xml_value_leaf_accessor() {
        let leaf = XmlAttributeValue::leaf("100");
        assert_eq!(leaf.as_leaf(), Some("100"));

        let nested = XmlAttributeValue::Nested {
            parent_value: None,
            children: BTreeMap::new(),
        };
        assert!(nested.as_leaf().is_none());
    }
}
