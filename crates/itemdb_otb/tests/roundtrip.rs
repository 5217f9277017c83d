//! Property tests: arbitrary item lists survive a write/read cycle.

use itemdb_core::{ServerItem, ServerItemList, ServerItemType, StackOrder};
use itemdb_otb::{read_server_items, write_server_items};
use proptest::prelude::*;

fn arb_item_type() -> impl Strategy<Value = ServerItemType> {
    prop_oneof![
        Just(ServerItemType::None),
        Just(ServerItemType::Ground),
        Just(ServerItemType::Container),
        Just(ServerItemType::Fluid),
        Just(ServerItemType::Splash),
    ]
}

fn arb_stack_order() -> impl Strategy<Value = StackOrder> {
    prop_oneof![
        Just(StackOrder::Border),
        Just(StackOrder::Bottom),
        Just(StackOrder::Top),
    ]
}

prop_compose! {
    fn arb_item()(
        id in 1u16..=u16::MAX,
        client_id in 1u16..=u16::MAX,
        item_type in arb_item_type(),
        flag_bits in proptest::bits::u32::masked(0x000F_FFFF),
        stack in proptest::option::of(arb_stack_order()),
        ground_speed in any::<u16>(),
        light_level in any::<u16>(),
        light_color in any::<u16>(),
        max_read_chars in any::<u16>(),
        max_read_write_chars in any::<u16>(),
        minimap_color in any::<u16>(),
        trade_as in any::<u16>(),
        name in "[a-z ]{0,24}",
        hash in proptest::array::uniform16(any::<u8>()),
    ) -> ServerItem {
        let mut item = ServerItem::new(id, client_id);
        item.item_type = item_type;
        item.unpassable = flag_bits & 1 != 0;
        item.block_missiles = flag_bits & 2 != 0;
        item.block_pathfinder = flag_bits & 4 != 0;
        item.has_elevation = flag_bits & 8 != 0;
        item.force_use = flag_bits & 16 != 0;
        item.multi_use = flag_bits & 32 != 0;
        item.pickupable = flag_bits & 64 != 0;
        item.movable = flag_bits & 128 != 0;
        item.stackable = flag_bits & 256 != 0;
        item.readable = flag_bits & 512 != 0;
        item.rotatable = flag_bits & 1024 != 0;
        item.hangable = flag_bits & 2048 != 0;
        item.hook_south = flag_bits & 4096 != 0;
        item.hook_east = flag_bits & 8192 != 0;
        item.has_charges = flag_bits & 16384 != 0;
        item.ignore_look = flag_bits & 32768 != 0;
        item.allow_distance_read = flag_bits & 65536 != 0;
        item.is_animation = flag_bits & 131072 != 0;
        item.full_ground = flag_bits & 262144 != 0;
        if let Some(order) = stack {
            item.has_stack_order = true;
            item.stack_order = order;
        }
        item.ground_speed = ground_speed;
        item.light_level = light_level;
        item.light_color = light_color;
        item.max_read_chars = max_read_chars;
        item.max_read_write_chars = max_read_write_chars;
        item.minimap_color = minimap_color;
        item.trade_as = trade_as;
        item.name = name;
        item.sprite_hash = Some(hash);
        item
    }
}

fn arb_list() -> impl Strategy<Value = ServerItemList> {
    proptest::collection::vec(arb_item(), 0..24).prop_map(|items| {
        let mut list = ServerItemList::new();
        list.major_version = 3;
        list.minor_version = 60;
        list.client_version = 1098;
        for item in items {
            // Colliding ids are dropped; uniqueness is the list's invariant,
            // not the generator's.
            let _ = list.add(item);
        }
        list
    })
}

proptest! {
    #[test]
    fn roundtrip_reproduces_all_items(list in arb_list()) {
        let bytes = write_server_items(&list).unwrap();
        let back = read_server_items(&bytes).unwrap();

        prop_assert_eq!(back.len(), list.len());
        for item in list.items() {
            let reread = back.get_by_id(item.id).unwrap();
            prop_assert_eq!(reread, item);
        }
    }

    #[test]
    fn write_is_deterministic(list in arb_list()) {
        let first = write_server_items(&list).unwrap();
        let second = write_server_items(&list).unwrap();
        prop_assert_eq!(first, second);
    }
}
