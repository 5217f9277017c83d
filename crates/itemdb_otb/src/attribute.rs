//! OTB attribute ids and node group codes.

use itemdb_core::ServerItemType;

/// TLV attribute ids used inside node payloads.
pub mod attr_id {
    /// Root node: format version record (length must be 140).
    pub const VERSION: u8 = 0x01;
    /// Server id (u16).
    pub const SERVER_ID: u8 = 0x10;
    /// Client id (u16).
    pub const CLIENT_ID: u8 = 0x11;
    /// Item name (UTF-8).
    pub const NAME: u8 = 0x12;
    /// Ground speed (u16).
    pub const GROUND_SPEED: u8 = 0x14;
    /// Sprite hash (16 raw bytes).
    pub const SPRITE_HASH: u8 = 0x20;
    /// Minimap color (u16).
    pub const MINIMAP_COLOR: u8 = 0x21;
    /// Maximum writable text length (u16).
    pub const MAX_READ_WRITE_CHARS: u8 = 0x22;
    /// Maximum readable text length (u16).
    pub const MAX_READ_CHARS: u8 = 0x23;
    /// Light level and color (u16 + u16).
    pub const LIGHT: u8 = 0x2A;
    /// Tile stack order (u8).
    pub const STACK_ORDER: u8 = 0x2B;
    /// Market trade-as id (u16).
    pub const TRADE_AS: u8 = 0x2D;
}

/// Byte length of the VERSION attribute: three u32 fields plus the 128-byte
/// CSD string.
pub const VERSION_ATTR_LENGTH: u16 = 140;

/// Item node group codes.
///
/// The full historical code space runs 0..=14; only the groups listed here
/// influence the server item type, everything else reads as `None`.
pub mod group {
    /// No special group.
    pub const NONE: u8 = 0;
    /// Ground tile.
    pub const GROUND: u8 = 1;
    /// Container.
    pub const CONTAINER: u8 = 2;
    /// Splash.
    pub const SPLASH: u8 = 11;
    /// Fluid container.
    pub const FLUID: u8 = 12;
    /// Deprecated placeholder.
    pub const DEPRECATED: u8 = 14;
    /// Highest code any known OTB build emits.
    pub const MAX: u8 = 14;
}

/// Maps a node group code to the server item type.
///
/// Returns `None` for codes outside the historical code space.
#[must_use]
pub fn type_from_group(code: u8) -> Option<ServerItemType> {
    match code {
        group::GROUND => Some(ServerItemType::Ground),
        group::CONTAINER => Some(ServerItemType::Container),
        group::SPLASH => Some(ServerItemType::Splash),
        group::FLUID => Some(ServerItemType::Fluid),
        group::DEPRECATED => Some(ServerItemType::Deprecated),
        code if code <= group::MAX => Some(ServerItemType::None),
        _ => None,
    }
}

/// Maps a server item type to its node group code.
#[must_use]
pub fn group_from_type(item_type: ServerItemType) -> u8 {
    match item_type {
        ServerItemType::None => group::NONE,
        ServerItemType::Ground => group::GROUND,
        ServerItemType::Container => group::CONTAINER,
        ServerItemType::Splash => group::SPLASH,
        ServerItemType::Fluid => group::FLUID,
        ServerItemType::Deprecated => group::DEPRECATED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_mapping_roundtrip() {
        for item_type in [
            ServerItemType::None,
            ServerItemType::Ground,
            ServerItemType::Container,
            ServerItemType::Splash,
            ServerItemType::Fluid,
            ServerItemType::Deprecated,
        ] {
            assert_eq!(type_from_group(group_from_type(item_type)), Some(item_type));
        }
    }

    #[test]
    fn legacy_groups_read_as_none() {
        // Weapon, armor and friends collapsed into None long ago.
        assert_eq!(type_from_group(3), Some(ServerItemType::None));
        assert_eq!(type_from_group(10), Some(ServerItemType::None));
        assert_eq!(type_from_group(15), None);
    }
}
