//! The items service: load, save, and reconciliation entry points.

use crate::error::{ServiceError, ServiceResult};
use itemdb_core::schema::{self, AttributeSchema};
use itemdb_core::{CoreError, ServerItemList};
use itemdb_otb::{read_server_items, write_server_items};
use itemdb_sync::{flags_match, sync_from_thing, PixelProvider, SyncOptions, ThingType};
use itemdb_xml::{read_items_xml, write_items_xml, XmlReadOptions, XmlWriteOptions};
use std::collections::HashMap;
use tracing::{debug, info};

/// Dialect used when a load request names none.
pub const DEFAULT_SERVER: &str = "tfs-1.4";

/// Input for [`ItemsService::load_server_items`].
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    /// OTB file contents.
    pub otb: Vec<u8>,
    /// items.xml contents, if the caller wants the overlay applied.
    pub xml: Option<String>,
    /// Attribute schema dialect to validate against; defaults to
    /// [`DEFAULT_SERVER`].
    pub attribute_server: Option<String>,
}

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Number of items in the loaded database.
    pub item_count: usize,
    /// Client version the database targets.
    pub client_version: u32,
    /// Items the XML overlay touched (0 without XML).
    pub xml_items_applied: usize,
    /// Nested attribute keys the schema does not know, sorted and
    /// de-duplicated.
    pub missing_attributes: Vec<String>,
    /// Tag attributes outside the known set, sorted and de-duplicated.
    pub missing_tag_attributes: Vec<String>,
}

/// Serialized database files produced by [`ItemsService::save_server_items`].
#[derive(Debug, Clone)]
pub struct SavedFiles {
    /// OTB file contents.
    pub otb: Vec<u8>,
    /// items.xml contents.
    pub xml: String,
}

struct LoadedSession {
    list: ServerItemList,
    schema: &'static AttributeSchema,
}

/// Owns one loaded server item database and composes the codecs and the
/// sync engine into the entry points a UI or CLI consumes.
///
/// One session at a time: a load fully replaces the previous session, and
/// every other operation fails with [`ServiceError::NotLoaded`] until a
/// load succeeds. Callers serialize access; the service is not `Sync`.
#[derive(Default)]
pub struct ItemsService {
    session: Option<LoadedSession>,
    sync_options: SyncOptions,
}

impl ItemsService {
    /// Creates a service with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a database is loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// The sync options applied by the sync entry points.
    #[must_use]
    pub fn sync_options(&self) -> &SyncOptions {
        &self.sync_options
    }

    /// Replaces the sync options.
    pub fn set_sync_options(&mut self, options: SyncOptions) {
        self.sync_options = options;
    }

    /// The loaded item list.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] when nothing is loaded.
    pub fn list(&self) -> ServiceResult<&ServerItemList> {
        self.session
            .as_ref()
            .map(|s| &s.list)
            .ok_or(ServiceError::NotLoaded)
    }

    /// The loaded item list for mutation.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] when nothing is loaded.
    pub fn list_mut(&mut self) -> ServiceResult<&mut ServerItemList> {
        self.session
            .as_mut()
            .map(|s| &mut s.list)
            .ok_or(ServiceError::NotLoaded)
    }

    /// The attribute schema the loaded session validates against.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] when nothing is loaded.
    pub fn schema(&self) -> ServiceResult<&'static AttributeSchema> {
        self.session
            .as_ref()
            .map(|s| s.schema)
            .ok_or(ServiceError::NotLoaded)
    }

    /// Loads an OTB database, optionally applying an items.xml overlay.
    ///
    /// Replaces any previously loaded session and aligns the sync options'
    /// client version with the loaded database.
    ///
    /// # Errors
    ///
    /// Fails on an unknown dialect name, a malformed OTB stream, or
    /// malformed XML. The previous session is dropped either way.
    pub fn load_server_items(&mut self, request: LoadRequest) -> ServiceResult<LoadReport> {
        self.session = None;

        let server = request
            .attribute_server
            .as_deref()
            .unwrap_or(DEFAULT_SERVER);
        let schema =
            schema::get(server).ok_or_else(|| ServiceError::unknown_server(server))?;

        let mut list = read_server_items(&request.otb)?;
        info!(
            items = list.len(),
            client_version = list.client_version,
            server,
            "loaded server item database"
        );

        let mut report = LoadReport {
            item_count: list.len(),
            client_version: list.client_version,
            xml_items_applied: 0,
            missing_attributes: Vec::new(),
            missing_tag_attributes: Vec::new(),
        };

        if let Some(xml) = &request.xml {
            let xml_report = read_items_xml(xml, &mut list, schema, &XmlReadOptions::default())?;
            debug!(
                applied = xml_report.items_applied,
                unknown_keys = xml_report.missing_attributes.len(),
                "applied items.xml overlay"
            );
            report.xml_items_applied = xml_report.items_applied;
            report.missing_attributes = xml_report.missing_attributes;
            report.missing_tag_attributes = xml_report.missing_tag_attributes;
        }

        self.sync_options.client_version = list.client_version;
        self.session = Some(LoadedSession { list, schema });
        Ok(report)
    }

    /// Serializes the loaded database back to OTB and items.xml.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] when nothing is loaded.
    pub fn save_server_items(&self) -> ServiceResult<SavedFiles> {
        let session = self.session.as_ref().ok_or(ServiceError::NotLoaded)?;
        let otb = write_server_items(&session.list)?;
        let xml = write_items_xml(&session.list, session.schema, &XmlWriteOptions::default());
        info!(
            items = session.list.len(),
            otb_bytes = otb.len(),
            "serialized server item database"
        );
        Ok(SavedFiles { otb, xml })
    }

    /// Syncs one item from a client appearance.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] or [`CoreError::ItemNotFound`] wrapped
    /// in [`ServiceError::Core`].
    pub fn sync_item(
        &mut self,
        id: u16,
        thing: &ThingType,
        pixels: Option<&dyn PixelProvider>,
    ) -> ServiceResult<()> {
        let options = self.sync_options.clone();
        let session = self.session.as_mut().ok_or(ServiceError::NotLoaded)?;
        let item = session
            .list
            .get_by_id_mut(id)
            .ok_or(CoreError::ItemNotFound { id })?;
        sync_from_thing(item, thing, &options, pixels);
        debug!(id, client_id = thing.id, "synced item from appearance");
        Ok(())
    }

    /// Syncs every non-deprecated item that has a matching appearance.
    ///
    /// Returns the number of items synced.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] when nothing is loaded.
    pub fn sync_all_items(
        &mut self,
        things: &[ThingType],
        pixels: Option<&dyn PixelProvider>,
    ) -> ServiceResult<usize> {
        let options = self.sync_options.clone();
        let session = self.session.as_mut().ok_or(ServiceError::NotLoaded)?;
        let by_client_id = index_things(things);

        let mut synced = 0;
        for item in session.list.items_mut() {
            if item.is_deprecated() {
                continue;
            }
            if let Some(thing) = by_client_id.get(&item.client_id) {
                sync_from_thing(item, thing, &options, pixels);
                synced += 1;
            }
        }
        info!(synced, total = session.list.len(), "synced all items");
        Ok(synced)
    }

    /// Creates a server item for every appearance id above the current
    /// maximum client id, syncing each new item from its appearance.
    ///
    /// Returns the number of items created.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`], or [`CoreError::IdSpaceExhausted`]
    /// when the server id space overflows.
    pub fn create_missing_items(
        &mut self,
        things: &[ThingType],
        pixels: Option<&dyn PixelProvider>,
    ) -> ServiceResult<usize> {
        let options = SyncOptions {
            sync_type: true,
            ..self.sync_options.clone()
        };
        let session = self.session.as_mut().ok_or(ServiceError::NotLoaded)?;
        let max_client_id = things.iter().map(|t| t.id).max().unwrap_or(0);

        let first_new_id = session.list.max_id().saturating_add(1);
        let created = session.list.create_missing_items(max_client_id)?;

        let by_client_id = index_things(things);
        for item in session.list.items_mut() {
            if item.id < first_new_id {
                continue;
            }
            if let Some(thing) = by_client_id.get(&item.client_id) {
                sync_from_thing(item, thing, &options, pixels);
            }
        }
        info!(created, max_client_id, "created missing items");
        Ok(created)
    }

    /// Ids of items whose flags no longer match their appearance, in
    /// ascending order. Deprecated items and items without a matching
    /// appearance are skipped.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotLoaded`] when nothing is loaded.
    pub fn find_out_of_sync_items(&self, things: &[ThingType]) -> ServiceResult<Vec<u16>> {
        let session = self.session.as_ref().ok_or(ServiceError::NotLoaded)?;
        let by_client_id = index_things(things);

        let mut out_of_sync = Vec::new();
        for item in session.list.items() {
            if item.is_deprecated() {
                continue;
            }
            if let Some(thing) = by_client_id.get(&item.client_id) {
                if !flags_match(item, thing, &self.sync_options) {
                    out_of_sync.push(item.id);
                }
            }
        }
        Ok(out_of_sync)
    }

    /// Drops the loaded session, if any.
    pub fn unload_server_items(&mut self) {
        if self.session.take().is_some() {
            info!("unloaded server item database");
        }
    }
}

fn index_things(things: &[ThingType]) -> HashMap<u16, &ThingType> {
    things.iter().map(|t| (t.id, t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemdb_core::{ServerItem, ServerItemType};
    use itemdb_sync::ThingCategory;

    fn sample_otb() -> Vec<u8> {
        let mut list = ServerItemList::new();
        list.major_version = 3;
        list.minor_version = 1098;
        list.client_version = 1098;

        let mut ground = ServerItem::new(100, 200);
        ground.item_type = ServerItemType::Ground;
        ground.ground_speed = 150;
        list.add(ground).unwrap();

        let mut sword = ServerItem::new(101, 201);
        sword.pickupable = true;
        sword.name = "sword".to_string();
        list.add(sword).unwrap();

        write_server_items(&list).unwrap()
    }

    fn ground_thing(id: u16, speed: u16) -> ThingType {
        let mut thing = ThingType::new(id, ThingCategory::Item);
        thing.is_ground = true;
        thing.ground_speed = speed;
        thing
    }

    #[test]
    fn operations_require_a_load() {
        let mut service = ItemsService::new();
        assert!(matches!(service.list(), Err(ServiceError::NotLoaded)));
        assert!(matches!(
            service.save_server_items(),
            Err(ServiceError::NotLoaded)
        ));
        assert!(matches!(
            service.sync_item(100, &ground_thing(200, 150), None),
            Err(ServiceError::NotLoaded)
        ));
        assert!(matches!(
            service.find_out_of_sync_items(&[]),
            Err(ServiceError::NotLoaded)
        ));
    }

    #[test]
    fn load_then_save_round_trips() {
        let mut service = ItemsService::new();
        let report = service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();
        assert_eq!(report.item_count, 2);
        assert_eq!(report.client_version, 1098);

        let saved = service.save_server_items().unwrap();
        assert_eq!(saved.otb, sample_otb());
        assert!(saved.xml.starts_with("<?xml"));
    }

    #[test]
    fn load_aligns_sync_client_version() {
        let mut service = ItemsService::new();
        service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();
        assert_eq!(service.sync_options().client_version, 1098);
    }

    #[test]
    fn unknown_server_rejected() {
        let mut service = ItemsService::new();
        let err = service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                attribute_server: Some("tfs-9.9".to_string()),
                ..LoadRequest::default()
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownServer { .. }));
        assert!(!service.is_loaded());
    }

    #[test]
    fn xml_overlay_applied_on_load() {
        let mut service = ItemsService::new();
        let xml = r#"<?xml version="1.0"?>
<items>
    <item id="101" name="steel sword">
        <attribute key="weight" value="4200"/>
    </item>
</items>"#;
        let report = service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                xml: Some(xml.to_string()),
                attribute_server: Some("tfs-1.4".to_string()),
            })
            .unwrap();
        assert_eq!(report.xml_items_applied, 1);
        assert!(report.missing_attributes.is_empty());

        let item = service.list().unwrap().get_by_id(101).unwrap();
        assert!(item.xml_attributes.contains_key("weight"));
    }

    #[test]
    fn sync_item_unknown_id_fails() {
        let mut service = ItemsService::new();
        service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();
        let err = service
            .sync_item(999, &ground_thing(200, 150), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::ItemNotFound { id: 999 })
        ));
    }

    #[test]
    fn sync_all_skips_unmatched_items() {
        let mut service = ItemsService::new();
        service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();
        // Only client id 200 has an appearance.
        let synced = service
            .sync_all_items(&[ground_thing(200, 150)], None)
            .unwrap();
        assert_eq!(synced, 1);
    }

    #[test]
    fn create_missing_items_syncs_new_entries() {
        let mut service = ItemsService::new();
        service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();

        // Client ids go up to 201; 202 and 203 are new.
        let things = vec![ground_thing(202, 90), ground_thing(203, 0)];
        let created = service.create_missing_items(&things, None).unwrap();
        assert_eq!(created, 2);

        let list = service.list().unwrap();
        let item = list.get_by_client_id(202)[0];
        assert_eq!(item.id, 102);
        assert_eq!(item.item_type, ServerItemType::Ground);
        assert_eq!(item.ground_speed, 90);
    }

    #[test]
    fn out_of_sync_detection() {
        let mut service = ItemsService::new();
        service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();

        let things = vec![ground_thing(200, 150)];
        // The loaded ground item never went through a sync, but its flags
        // already agree with the appearance.
        assert_eq!(
            service.find_out_of_sync_items(&things).unwrap(),
            Vec::<u16>::new()
        );

        service
            .list_mut()
            .unwrap()
            .get_by_id_mut(100)
            .unwrap()
            .unpassable = true;
        assert_eq!(service.find_out_of_sync_items(&things).unwrap(), vec![100]);

        service.sync_item(100, &things[0], None).unwrap();
        assert!(service.find_out_of_sync_items(&things).unwrap().is_empty());
    }

    #[test]
    fn unload_drops_the_session() {
        let mut service = ItemsService::new();
        service
            .load_server_items(LoadRequest {
                otb: sample_otb(),
                ..LoadRequest::default()
            })
            .unwrap();
        assert!(service.is_loaded());
        service.unload_server_items();
        assert!(!service.is_loaded());
        assert!(matches!(service.list(), Err(ServiceError::NotLoaded)));
    }
}
