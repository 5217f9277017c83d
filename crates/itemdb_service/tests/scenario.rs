//! End-to-end load, sync, and save scenarios through the items service.

use itemdb_core::{ServerItem, ServerItemList, ServerItemType};
use itemdb_otb::write_server_items;
use itemdb_service::{ItemsService, LoadRequest};
use itemdb_sync::{FrameGroup, PixelProvider, ThingCategory, ThingType};

/// One Ground item (server id 100, client id 200, ground speed 150),
/// written without a sprite hash.
fn ground_only_otb() -> Vec<u8> {
    let mut list = ServerItemList::new();
    list.major_version = 3;
    list.minor_version = 1098;
    list.client_version = 1098;

    let mut ground = ServerItem::new(100, 200);
    ground.item_type = ServerItemType::Ground;
    ground.ground_speed = 150;
    list.add(ground).unwrap();

    write_server_items(&list).unwrap()
}

fn ground_thing(id: u16, speed: u16) -> ThingType {
    let mut thing = ThingType::new(id, ThingCategory::Item);
    thing.is_ground = true;
    thing.ground_speed = speed;
    thing.frame_groups.push(FrameGroup {
        sprite_ids: vec![42],
        ..FrameGroup::default()
    });
    thing
}

struct SolidPixels;

impl PixelProvider for SolidPixels {
    fn sprite_pixels(&self, _sprite_id: u32) -> Option<Vec<u8>> {
        Some(vec![0xAB; 32 * 32 * 4])
    }
}

#[test]
fn load_sync_and_stay_in_sync() {
    let mut service = ItemsService::new();
    let report = service
        .load_server_items(LoadRequest {
            otb: ground_only_otb(),
            ..LoadRequest::default()
        })
        .unwrap();
    assert_eq!(report.item_count, 1);
    assert_eq!(report.client_version, 1098);

    // The loaded item keeps its persisted state, and the absent sprite
    // hash comes back as a zeroed digest.
    let item = service.list().unwrap().get_by_id(100).unwrap();
    assert_eq!(item.item_type, ServerItemType::Ground);
    assert_eq!(item.ground_speed, 150);
    assert_eq!(item.sprite_hash, Some([0u8; 16]));

    let thing = ground_thing(200, 150);
    service.sync_item(100, &thing, Some(&SolidPixels)).unwrap();

    let item = service.list().unwrap().get_by_id(100).unwrap();
    assert_eq!(item.ground_speed, 150);
    assert_ne!(item.sprite_hash, Some([0u8; 16]));
    assert!(service.find_out_of_sync_items(&[thing]).unwrap().is_empty());
}

#[test]
fn full_cycle_survives_save_and_reload() {
    let mut service = ItemsService::new();
    service
        .load_server_items(LoadRequest {
            otb: ground_only_otb(),
            ..LoadRequest::default()
        })
        .unwrap();

    let things = vec![ground_thing(200, 150), ground_thing(201, 0)];
    let created = service.create_missing_items(&things, None).unwrap();
    assert_eq!(created, 1);
    service.sync_all_items(&things, None).unwrap();

    let saved = service.save_server_items().unwrap();

    let mut reloaded = ItemsService::new();
    reloaded
        .load_server_items(LoadRequest {
            otb: saved.otb,
            xml: Some(saved.xml),
            ..LoadRequest::default()
        })
        .unwrap();

    let list = reloaded.list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.get_by_client_id(201)[0].id, 101);
    assert!(reloaded.find_out_of_sync_items(&things).unwrap().is_empty());
}
