//! Legacy Inventory Cache
//!
//! Last successfully fetched inventory, used when the backend is unreachable.

use crate::models::InventoryItem;
use crate::storage::{self, KeyValueStore};

const INVENTORY_KEY: &str = "inventory";

pub struct InventoryCache<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> InventoryCache<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn save(&self, items: &[InventoryItem]) {
        storage::save_json(self.store, INVENTORY_KEY, items);
    }

    /// Cached list, empty when absent or unreadable
    pub fn load(&self) -> Vec<InventoryItem> {
        storage::load_json(self.store, INVENTORY_KEY).unwrap_or_default()
    }

    /// Apply a local stock change so the fallback stays close to the server
    pub fn adjust_stock(&self, sold: &[(String, u32)]) {
        let mut items = self.load();
        if items.is_empty() {
            return;
        }
        for (id, quantity) in sold {
            if let Some(item) = items.iter_mut().find(|i| &i.id == id) {
                item.quantity = (item.quantity - i64::from(*quantity)).max(0);
            }
        }
        self.save(&items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_save_load_and_adjust() {
        let store = MemoryStorage::default();
        let cache = InventoryCache::new(&store);
        assert!(cache.load().is_empty());

        let items = vec![
            InventoryItem {
                id: "a".into(),
                name: "Tile".into(),
                quantity: 5,
                ..Default::default()
            },
            InventoryItem {
                id: "b".into(),
                name: "Grout".into(),
                quantity: 1,
                ..Default::default()
            },
        ];
        cache.save(&items);
        assert_eq!(cache.load(), items);

        cache.adjust_stock(&[("a".to_string(), 2), ("b".to_string(), 3), ("zzz".to_string(), 1)]);
        let adjusted = cache.load();
        assert_eq!(adjusted[0].quantity, 3);
        assert_eq!(adjusted[1].quantity, 0);
    }
}
