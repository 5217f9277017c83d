//! Client appearance input model.
//!
//! These types mirror the part of a client appearance catalog the sync
//! engine reads. They are inputs only; this crate never mutates them and
//! does not own their loading.

/// Client appearance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThingCategory {
    /// Regular item appearance.
    #[default]
    Item,
    /// Creature outfit.
    Outfit,
    /// Magic effect.
    Effect,
    /// Distance missile.
    Missile,
}

/// Animation geometry of one appearance state.
///
/// Sprite ids are laid out frame-major: the first
/// `width * height * layers` entries belong to frame 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGroup {
    /// Tiles covered horizontally.
    pub width: u8,
    /// Tiles covered vertically.
    pub height: u8,
    /// Drawing layers (blend layers for colorized appearances).
    pub layers: u8,
    /// Animation frame count.
    pub frames: u8,
    /// Sprite ids for all frames.
    pub sprite_ids: Vec<u32>,
}

impl Default for FrameGroup {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            layers: 1,
            frames: 1,
            sprite_ids: Vec::new(),
        }
    }
}

impl FrameGroup {
    /// Number of sprites making up a single frame.
    #[must_use]
    pub fn sprites_per_frame(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * usize::from(self.layers)
    }

    /// Sprite id at the given index of frame 0, or 0 when absent.
    #[must_use]
    pub fn frame_zero_sprite(&self, index: usize) -> u32 {
        self.sprite_ids.get(index).copied().unwrap_or(0)
    }
}

/// One client appearance record.
///
/// Field names follow the client flag vocabulary, which is close to but
/// not identical to the server item's: for example the client stores
/// `is_unmoveable` where the server stores `movable`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThingType {
    /// Client appearance id.
    pub id: u16,
    /// Appearance category.
    pub category: ThingCategory,

    /// Ground tile.
    pub is_ground: bool,
    /// Walking speed when this is a ground tile.
    pub ground_speed: u16,
    /// Container.
    pub is_container: bool,
    /// Fluid container (vial, jug).
    pub is_fluid_container: bool,
    /// Spilled fluid.
    pub is_fluid: bool,

    /// Blocks walking.
    pub is_unpassable: bool,
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
    /// Cannot be moved.
    pub is_unmoveable: bool,
    /// Stacks into counted piles.
    pub stackable: bool,
    /// Carries rewritable text.
    pub writable: bool,
    /// Carries write-once text.
    pub writable_once: bool,
    /// Carries a lens-help marker.
    pub is_lens_help: bool,
    /// Lens-help id; 1112 marks readable signs.
    pub lens_help: u16,
    /// Can be rotated.
    pub rotatable: bool,
    /// Can be hung on walls.
    pub hangable: bool,
    /// Hangs on south-facing walls.
    pub hook_south: bool,
    /// Hangs on east-facing walls.
    pub hook_east: bool,
    /// Excluded from look descriptions.
    pub ignore_look: bool,
    /// Covers the whole tile as ground.
    pub full_ground: bool,

    /// Drawn as a ground border.
    pub is_ground_border: bool,
    /// Drawn at the bottom of the stack.
    pub is_on_bottom: bool,
    /// Drawn on top of the stack.
    pub is_on_top: bool,

    /// Maximum characters of write-once text.
    pub max_read_chars: u16,
    /// Maximum characters of rewritable text.
    pub max_read_write_chars: u16,
    /// Emitted light strength.
    pub light_level: u16,
    /// Emitted light color.
    pub light_color: u16,
    /// Minimap color override.
    pub minimap_color: u16,

    /// Market display name; empty when the item is not tradeable.
    pub market_name: String,
    /// Item id this trades as on the market, 0 when unset.
    pub market_trade_as: u16,

    /// Animation frame groups; the first one is the default state.
    pub frame_groups: Vec<FrameGroup>,
}

impl ThingType {
    /// Creates an appearance with the given client id.
    #[must_use]
    pub fn new(id: u16, category: ThingCategory) -> Self {
        Self {
            id,
            category,
            ..Self::default()
        }
    }

    /// The default (idle) frame group, if any.
    #[must_use]
    pub fn default_frame_group(&self) -> Option<&FrameGroup> {
        self.frame_groups.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprites_per_frame_multiplies_geometry() {
        let group = FrameGroup {
            width: 2,
            height: 2,
            layers: 3,
            ..FrameGroup::default()
        };
        assert_eq!(group.sprites_per_frame(), 12);
    }

    #[test]
    fn missing_sprite_slot_reads_as_zero() {
        let group = FrameGroup {
            sprite_ids: vec![7],
            ..FrameGroup::default()
        };
        assert_eq!(group.frame_zero_sprite(0), 7);
        assert_eq!(group.frame_zero_sprite(1), 0);
    }

    #[test]
    fn default_frame_group_is_first() {
        let mut thing = ThingType::new(100, ThingCategory::Item);
        assert!(thing.default_frame_group().is_none());
        thing.frame_groups.push(FrameGroup {
            frames: 4,
            ..FrameGroup::default()
        });
        thing.frame_groups.push(FrameGroup::default());
        assert_eq!(thing.default_frame_group().unwrap().frames, 4);
    }
}
