//! In-memory server item collection.

use crate::error::{CoreError, CoreResult};
use crate::item::ServerItem;
use std::collections::{BTreeMap, HashMap};

/// Owns all server items of one loaded database.
///
/// Items are indexed by server id (the primary, unique key) and by client id
/// (one-to-many). The primary index is a `BTreeMap`, so ascending iteration
/// and the min/max ids fall out of the structure; removing a boundary id
/// needs no rescan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerItemList {
    /// OTB major (file format) version.
    pub major_version: u32,
    /// OTB minor version (usually tracks the client data version).
    pub minor_version: u32,
    /// OTB build number.
    pub build_number: u32,
    /// Client version this database targets, e.g. 1098 for 10.98.
    pub client_version: u32,

    items: BTreeMap<u16, ServerItem>,
    by_client_id: HashMap<u16, Vec<u16>>,
}

impl ServerItemList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Smallest server id, or 0 when empty.
    #[must_use]
    pub fn min_id(&self) -> u16 {
        self.items.keys().next().copied().unwrap_or(0)
    }

    /// Largest server id, or 0 when empty.
    #[must_use]
    pub fn max_id(&self) -> u16 {
        self.items.keys().next_back().copied().unwrap_or(0)
    }

    /// Largest client id referenced by any item, or 0 when none.
    #[must_use]
    pub fn max_client_id(&self) -> u16 {
        self.by_client_id.keys().max().copied().unwrap_or(0)
    }

    /// Adds an item.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateId`] if an item with the same server id
    /// is already present; the list is left unchanged.
    pub fn add(&mut self, item: ServerItem) -> CoreResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(CoreError::duplicate_id(item.id));
        }
        if item.client_id != 0 {
            self.by_client_id
                .entry(item.client_id)
                .or_default()
                .push(item.id);
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Removes an item by server id, returning it if present.
    pub fn remove_by_id(&mut self, id: u16) -> Option<ServerItem> {
        let item = self.items.remove(&id)?;
        if item.client_id != 0 {
            if let Some(ids) = self.by_client_id.get_mut(&item.client_id) {
                ids.retain(|&other| other != id);
                if ids.is_empty() {
                    self.by_client_id.remove(&item.client_id);
                }
            }
        }
        Some(item)
    }

    /// Returns true if an item with this server id exists.
    #[must_use]
    pub fn contains(&self, id: u16) -> bool {
        self.items.contains_key(&id)
    }

    /// Looks up an item by server id.
    #[must_use]
    pub fn get_by_id(&self, id: u16) -> Option<&ServerItem> {
        self.items.get(&id)
    }

    /// Looks up an item by server id for mutation.
    ///
    /// The server id and client id of the returned item must not be changed
    /// through this reference; use remove/add to re-key an item.
    pub fn get_by_id_mut(&mut self, id: u16) -> Option<&mut ServerItem> {
        self.items.get_mut(&id)
    }

    /// Returns all items sharing this client id, in insertion order.
    #[must_use]
    pub fn get_by_client_id(&self, client_id: u16) -> Vec<&ServerItem> {
        self.by_client_id
            .get(&client_id)
            .map(|ids| ids.iter().filter_map(|id| self.items.get(id)).collect())
            .unwrap_or_default()
    }

    /// Iterates items in ascending server id order.
    pub fn items(&self) -> impl Iterator<Item = &ServerItem> {
        self.items.values()
    }

    /// Iterates items mutably in ascending server id order.
    ///
    /// Ids must not be changed through the returned references.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut ServerItem> {
        self.items.values_mut()
    }

    /// Creates a placeholder item for every client id in
    /// `(max_client_id(), max_client_id]` that no existing item references.
    ///
    /// Each new item gets a fresh server id (`max_id() + 1`, incrementing)
    /// and a zeroed sprite hash. Returns the number of items created.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdSpaceExhausted`] if a fresh server id would
    /// overflow `u16`; items created before the overflow are kept.
    pub fn create_missing_items(&mut self, max_client_id: u16) -> CoreResult<usize> {
        let start = self.max_client_id();
        let mut created = 0;
        for client_id in start.saturating_add(1)..=max_client_id {
            if self.by_client_id.contains_key(&client_id) {
                continue;
            }
            let next_id = self
                .max_id()
                .checked_add(1)
                .ok_or(CoreError::IdSpaceExhausted { max: u16::MAX })?;
            let mut item = ServerItem::new(next_id, client_id);
            item.sprite_hash = Some([0u8; 16]);
            self.add(item)?;
            created += 1;
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ServerItemType;

    fn item(id: u16, client_id: u16) -> ServerItem {
        ServerItem::new(id, client_id)
    }

    #[test]
    fn add_and_get() {
        let mut list = ServerItemList::new();
        list.add(item(100, 200)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get_by_id(100).unwrap().client_id, 200);
        assert!(list.get_by_id(101).is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut list = ServerItemList::new();
        list.add(item(100, 200)).unwrap();
        let err = list.add(item(100, 201)).unwrap_err();
        assert_eq!(err, CoreError::DuplicateId { id: 100 });
        assert_eq!(list.len(), 1);
        // Client index must not have picked up the rejected item.
        assert!(list.get_by_client_id(201).is_empty());
    }

    #[test]
    fn client_id_index_insertion_order() {
        let mut list = ServerItemList::new();
        list.add(item(300, 500)).unwrap();
        list.add(item(100, 500)).unwrap();
        list.add(item(200, 500)).unwrap();

        let ids: Vec<u16> = list.get_by_client_id(500).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![300, 100, 200]);
    }

    #[test]
    fn remove_updates_indices_and_bounds() {
        let mut list = ServerItemList::new();
        list.add(item(100, 200)).unwrap();
        list.add(item(150, 200)).unwrap();
        list.add(item(300, 400)).unwrap();
        assert_eq!(list.min_id(), 100);
        assert_eq!(list.max_id(), 300);

        let removed = list.remove_by_id(300).unwrap();
        assert_eq!(removed.client_id, 400);
        assert_eq!(list.max_id(), 150);
        assert!(list.get_by_client_id(400).is_empty());

        list.remove_by_id(100);
        assert_eq!(list.min_id(), 150);
        let ids: Vec<u16> = list.get_by_client_id(200).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![150]);
    }

    #[test]
    fn deprecated_items_stay_out_of_client_index() {
        let mut list = ServerItemList::new();
        let mut dep = item(100, 0);
        dep.item_type = ServerItemType::Deprecated;
        list.add(dep).unwrap();
        assert_eq!(list.max_client_id(), 0);
    }

    #[test]
    fn items_iterate_ascending() {
        let mut list = ServerItemList::new();
        list.add(item(300, 3)).unwrap();
        list.add(item(100, 1)).unwrap();
        list.add(item(200, 2)).unwrap();
        let ids: Vec<u16> = list.items().map(|i| i.id).collect();
        assert_eq!(ids, vec![100, 200, 300]);
    }

    #[test]
    fn create_missing_items_fills_gap() {
        let mut list = ServerItemList::new();
        list.add(item(100, 90)).unwrap();
        list.add(item(101, 92)).unwrap();

        // Highest known client id is 92; 93..=95 are missing.
        let created = list.create_missing_items(95).unwrap();
        assert_eq!(created, 3);
        assert_eq!(list.max_id(), 104);

        let new_item = list.get_by_client_id(93)[0];
        assert_eq!(new_item.id, 102);
        assert_eq!(new_item.sprite_hash, Some([0u8; 16]));
    }

    #[test]
    fn create_missing_items_noop_when_covered() {
        let mut list = ServerItemList::new();
        list.add(item(100, 90)).unwrap();
        assert_eq!(list.create_missing_items(90).unwrap(), 0);
        assert_eq!(list.create_missing_items(50).unwrap(), 0);
    }
}
