//! OTB item flag bitset.
//!
//! This is the stable 27-bit vocabulary persisted in the item node's flags
//! field. It is distinct from (and must not be conflated with) the OBD
//! thing-type property flags of the client catalog.

use itemdb_core::ServerItem;

/// One defined bit of the OTB item flags field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
#[allow(missing_docs)]
pub enum ItemFlag {
    Unpassable = 1 << 0,
    BlockMissiles = 1 << 1,
    BlockPathfinder = 1 << 2,
    HasElevation = 1 << 3,
    ForceUse = 1 << 4,
    MultiUse = 1 << 5,
    Pickupable = 1 << 6,
    Movable = 1 << 7,
    Stackable = 1 << 8,
    FloorChangeDown = 1 << 9,
    FloorChangeNorth = 1 << 10,
    FloorChangeEast = 1 << 11,
    FloorChangeSouth = 1 << 12,
    HasStackOrder = 1 << 13,
    Readable = 1 << 14,
    Rotatable = 1 << 15,
    Hangable = 1 << 16,
    HookSouth = 1 << 17,
    HookEast = 1 << 18,
    CanNotDecay = 1 << 19,
    AllowDistanceRead = 1 << 20,
    Unused = 1 << 21,
    ClientCharges = 1 << 22,
    IgnoreLook = 1 << 23,
    IsAnimation = 1 << 24,
    FullGround = 1 << 25,
    Usable = 1 << 26,
}

impl ItemFlag {
    /// Returns the bit value.
    #[must_use]
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// Tests this flag in a bitset.
    #[must_use]
    pub const fn is_set(self, flags: u32) -> bool {
        flags & self.bit() != 0
    }
}

/// Derives the persisted flags field from an item's boolean fields.
#[must_use]
pub fn flags_from_item(item: &ServerItem) -> u32 {
    let mut flags = 0u32;
    let mut set = |flag: ItemFlag, on: bool| {
        if on {
            flags |= flag.bit();
        }
    };
    set(ItemFlag::Unpassable, item.unpassable);
    set(ItemFlag::BlockMissiles, item.block_missiles);
    set(ItemFlag::BlockPathfinder, item.block_pathfinder);
    set(ItemFlag::HasElevation, item.has_elevation);
    set(ItemFlag::ForceUse, item.force_use);
    set(ItemFlag::MultiUse, item.multi_use);
    set(ItemFlag::Pickupable, item.pickupable);
    set(ItemFlag::Movable, item.movable);
    set(ItemFlag::Stackable, item.stackable);
    set(ItemFlag::HasStackOrder, item.has_stack_order);
    set(ItemFlag::Readable, item.readable);
    set(ItemFlag::Rotatable, item.rotatable);
    set(ItemFlag::Hangable, item.hangable);
    set(ItemFlag::HookSouth, item.hook_south);
    set(ItemFlag::HookEast, item.hook_east);
    set(ItemFlag::AllowDistanceRead, item.allow_distance_read);
    set(ItemFlag::ClientCharges, item.has_charges);
    set(ItemFlag::IgnoreLook, item.ignore_look);
    set(ItemFlag::IsAnimation, item.is_animation);
    set(ItemFlag::FullGround, item.full_ground);
    flags
}

/// Applies a persisted flags field to an item's boolean fields.
///
/// Bits the server item does not model (floor changes, decay, usable) are
/// accepted and dropped.
pub fn apply_flags(item: &mut ServerItem, flags: u32) {
    item.unpassable = ItemFlag::Unpassable.is_set(flags);
    item.block_missiles = ItemFlag::BlockMissiles.is_set(flags);
    item.block_pathfinder = ItemFlag::BlockPathfinder.is_set(flags);
    item.has_elevation = ItemFlag::HasElevation.is_set(flags);
    item.force_use = ItemFlag::ForceUse.is_set(flags);
    item.multi_use = ItemFlag::MultiUse.is_set(flags);
    item.pickupable = ItemFlag::Pickupable.is_set(flags);
    item.movable = ItemFlag::Movable.is_set(flags);
    item.stackable = ItemFlag::Stackable.is_set(flags);
    item.has_stack_order = ItemFlag::HasStackOrder.is_set(flags);
    item.readable = ItemFlag::Readable.is_set(flags);
    item.rotatable = ItemFlag::Rotatable.is_set(flags);
    item.hangable = ItemFlag::Hangable.is_set(flags);
    item.hook_south = ItemFlag::HookSouth.is_set(flags);
    item.hook_east = ItemFlag::HookEast.is_set(flags);
    item.allow_distance_read = ItemFlag::AllowDistanceRead.is_set(flags);
    item.has_charges = ItemFlag::ClientCharges.is_set(flags);
    item.ignore_look = ItemFlag::IgnoreLook.is_set(flags);
    item.is_animation = ItemFlag::IsAnimation.is_set(flags);
    item.full_ground = ItemFlag::FullGround.is_set(flags);
}
