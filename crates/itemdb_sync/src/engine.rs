//! Projection of client appearances onto server items.

use crate::hash::md5_bytes;
use itemdb_core::{ServerItem, ServerItemType, StackOrder};

use crate::thing::ThingType;

/// Lens-help id the client uses to mark readable signs.
const LENS_HELP_READABLE: u16 = 1112;

/// First client version whose OTB writer can encode `force_use` and
/// `full_ground`.
const FORCE_USE_MIN_VERSION: u32 = 1010;

/// Edge length of the placeholder sprite substituted for missing ids.
const PLACEHOLDER_SIZE: usize = 32;

/// Supplies canonical RGBA pixel bytes for sprite ids.
///
/// Sprite storage is outside this crate; the engine only needs a way to
/// resolve an id to pixels when computing hashes.
pub trait PixelProvider {
    /// Returns the pixel bytes for `sprite_id`, or `None` when the sprite
    /// does not exist.
    fn sprite_pixels(&self, sprite_id: u32) -> Option<Vec<u8>>;
}

/// Options controlling one sync pass.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Overwrite the item's type from the appearance.
    pub sync_type: bool,
    /// Client version the target OTB is written for; gates flags the
    /// legacy format cannot encode.
    pub client_version: u32,
    /// Use a fully transparent placeholder for missing sprites instead of
    /// the opaque magenta fill.
    pub transparent: bool,
}

/// The appearance-derived fields, computed without touching an item.
///
/// Both [`sync_from_thing`] and [`flags_match`] go through this so the two
/// can never disagree about what an appearance implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Projection {
    item_type: ServerItemType,
    unpassable: bool,
    block_missiles: bool,
    block_pathfinder: bool,
    has_elevation: bool,
    force_use: bool,
    multi_use: bool,
    pickupable: bool,
    movable: bool,
    stackable: bool,
    readable: bool,
    rotatable: bool,
    hangable: bool,
    hook_south: bool,
    hook_east: bool,
    has_charges: bool,
    ignore_look: bool,
    allow_distance_read: bool,
    is_animation: bool,
    full_ground: bool,
    stack_order: StackOrder,
    has_stack_order: bool,
}

fn project(thing: &ThingType, client_version: u32) -> Projection {
    // Type groups are mutually exclusive; first match wins.
    let item_type = if thing.is_ground {
        ServerItemType::Ground
    } else if thing.is_container {
        ServerItemType::Container
    } else if thing.is_fluid_container {
        ServerItemType::Fluid
    } else if thing.is_fluid {
        ServerItemType::Splash
    } else {
        ServerItemType::None
    };

    let encodes_modern_flags = client_version >= FORCE_USE_MIN_VERSION;

    let stack_order = if thing.is_ground_border {
        StackOrder::Border
    } else if thing.is_on_bottom {
        StackOrder::Bottom
    } else if thing.is_on_top {
        StackOrder::Top
    } else {
        StackOrder::None
    };

    Projection {
        item_type,
        unpassable: thing.is_unpassable,
        block_missiles: thing.block_missiles,
        block_pathfinder: thing.block_pathfinder,
        has_elevation: thing.has_elevation,
        force_use: thing.force_use && encodes_modern_flags,
        multi_use: thing.multi_use,
        pickupable: thing.pickupable,
        movable: !thing.is_unmoveable,
        stackable: thing.stackable,
        readable: thing.writable
            || thing.writable_once
            || (thing.is_lens_help && thing.lens_help == LENS_HELP_READABLE),
        rotatable: thing.rotatable,
        hangable: thing.hangable,
        hook_south: thing.hook_south,
        hook_east: thing.hook_east,
        // The OTB writer has no encoding for these, so sync always clears
        // them regardless of the appearance.
        has_charges: false,
        ignore_look: thing.ignore_look,
        allow_distance_read: false,
        is_animation: thing
            .default_frame_group()
            .is_some_and(|group| group.frames > 1),
        full_ground: thing.full_ground && encodes_modern_flags,
        stack_order,
        has_stack_order: stack_order != StackOrder::None,
    }
}

/// Overwrites `item`'s appearance-derived state from `thing`.
///
/// The type is only replaced when `options.sync_type` is set. Name and
/// trade-as are non-destructive: an empty market name or a zero trade-as
/// id never blanks existing values. The sprite hash is recomputed only
/// when a `pixels` provider is given and the item does not end up
/// deprecated.
pub fn sync_from_thing(
    item: &mut ServerItem,
    thing: &ThingType,
    options: &SyncOptions,
    pixels: Option<&dyn PixelProvider>,
) {
    let projection = project(thing, options.client_version);

    if options.sync_type {
        item.item_type = projection.item_type;
    }

    item.unpassable = projection.unpassable;
    item.block_missiles = projection.block_missiles;
    item.block_pathfinder = projection.block_pathfinder;
    item.has_elevation = projection.has_elevation;
    item.force_use = projection.force_use;
    item.multi_use = projection.multi_use;
    item.pickupable = projection.pickupable;
    item.movable = projection.movable;
    item.stackable = projection.stackable;
    item.readable = projection.readable;
    item.rotatable = projection.rotatable;
    item.hangable = projection.hangable;
    item.hook_south = projection.hook_south;
    item.hook_east = projection.hook_east;
    item.has_charges = projection.has_charges;
    item.ignore_look = projection.ignore_look;
    item.allow_distance_read = projection.allow_distance_read;
    item.is_animation = projection.is_animation;
    item.full_ground = projection.full_ground;
    item.stack_order = projection.stack_order;
    item.has_stack_order = projection.has_stack_order;

    // Numeric fields gate on the item's resulting type and write
    // capability; ungated ones copy straight through.
    item.ground_speed = if item.item_type == ServerItemType::Ground {
        thing.ground_speed
    } else {
        0
    };
    item.max_read_write_chars = if thing.writable {
        thing.max_read_write_chars
    } else {
        0
    };
    item.max_read_chars = if thing.writable_once {
        thing.max_read_chars
    } else {
        0
    };
    item.light_level = thing.light_level;
    item.light_color = thing.light_color;
    item.minimap_color = thing.minimap_color;

    if !thing.market_name.is_empty() {
        item.name = thing.market_name.clone();
    }
    if thing.market_trade_as != 0 {
        item.trade_as = thing.market_trade_as;
    }

    if let Some(provider) = pixels {
        if !item.is_deprecated() {
            item.sprite_hash = Some(compute_sprite_hash(thing, provider, options.transparent));
        }
    }
}

/// Builds a new server item from an appearance.
///
/// The item gets `new_server_id`, the appearance's id as client id, and a
/// full type-syncing projection pass.
#[must_use]
pub fn create_from_thing(
    thing: &ThingType,
    new_server_id: u16,
    options: &SyncOptions,
    pixels: Option<&dyn PixelProvider>,
) -> ServerItem {
    let mut item = ServerItem::new(new_server_id, thing.id);
    let options = SyncOptions {
        sync_type: true,
        ..options.clone()
    };
    sync_from_thing(&mut item, thing, &options, pixels);
    item
}

/// Returns true when `item`'s type, flags, and stack order already equal
/// what a sync from `thing` would produce.
///
/// The type is always compared, independent of `options.sync_type`. Name,
/// trade-as, sprite hash, and XML attributes are never compared.
#[must_use]
pub fn flags_match(item: &ServerItem, thing: &ThingType, options: &SyncOptions) -> bool {
    let projection = project(thing, options.client_version);
    item.item_type == projection.item_type
        && item.unpassable == projection.unpassable
        && item.block_missiles == projection.block_missiles
        && item.block_pathfinder == projection.block_pathfinder
        && item.has_elevation == projection.has_elevation
        && item.force_use == projection.force_use
        && item.multi_use == projection.multi_use
        && item.pickupable == projection.pickupable
        && item.movable == projection.movable
        && item.stackable == projection.stackable
        && item.readable == projection.readable
        && item.rotatable == projection.rotatable
        && item.hangable == projection.hangable
        && item.hook_south == projection.hook_south
        && item.hook_east == projection.hook_east
        && item.has_charges == projection.has_charges
        && item.ignore_look == projection.ignore_look
        && item.allow_distance_read == projection.allow_distance_read
        && item.is_animation == projection.is_animation
        && item.full_ground == projection.full_ground
        && item.stack_order == projection.stack_order
        && item.has_stack_order == projection.has_stack_order
}

/// Hashes the canonical pixels of the appearance's idle frame.
///
/// The digest covers the `width * height * layers` sprites of frame 0 in
/// order; missing sprites contribute a fixed placeholder so the hash is
/// stable across providers with different holes.
fn compute_sprite_hash(thing: &ThingType, provider: &dyn PixelProvider, transparent: bool) -> [u8; 16] {
    let mut buffer = Vec::new();
    if let Some(group) = thing.default_frame_group() {
        for index in 0..group.sprites_per_frame() {
            let sprite_id = group.frame_zero_sprite(index);
            match provider.sprite_pixels(sprite_id) {
                Some(pixels) => buffer.extend_from_slice(&pixels),
                None => buffer.extend_from_slice(&placeholder_pixels(transparent)),
            }
        }
    }
    md5_bytes(&buffer)
}

/// 32x32 RGBA placeholder: fully transparent, or the opaque magenta fill
/// legacy sprite pipelines used for blanks.
fn placeholder_pixels(transparent: bool) -> Vec<u8> {
    let pixel: [u8; 4] = if transparent {
        [0, 0, 0, 0]
    } else {
        [0xFF, 0x00, 0xFF, 0xFF]
    };
    pixel
        .iter()
        .copied()
        .cycle()
        .take(PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4)
        .collect()
}
