//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cart::Cart;
use crate::inventory_cache::InventoryCache;
use crate::models::InventoryItem;
use crate::storage::BrowserStorage;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Pending bill lines (mirrored to local storage)
    pub cart: Cart,
    /// Last loaded inventory, shared by the sales and products pages
    pub inventory: Vec<InventoryItem>,
    /// True when `inventory` came from the local cache
    pub inventory_is_cached: bool,
}

impl AppState {
    /// Restore persisted cart and cached inventory
    pub fn restore() -> Self {
        Self {
            cart: Cart::load(&BrowserStorage),
            inventory: InventoryCache::new(&BrowserStorage).load(),
            inventory_is_cached: true,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Mutate the cart and persist the result
pub fn store_update_cart(store: &AppStore, f: impl FnOnce(&mut Cart)) {
    let cart = store.cart();
    let mut guard = cart.write();
    f(&mut guard);
    guard.persist(&BrowserStorage);
}

pub fn store_set_inventory(store: &AppStore, items: Vec<InventoryItem>, cached: bool) {
    store.inventory().set(items);
    store.inventory_is_cached().set(cached);
}

/// Insert or replace an inventory item by ID
pub fn store_upsert_inventory_item(store: &AppStore, updated: InventoryItem) {
    let inventory = store.inventory();
    let mut items = inventory.write();
    match items.iter_mut().find(|item| item.id == updated.id) {
        Some(item) => *item = updated,
        None => items.push(updated),
    }
}

/// Remove an inventory item from the store by ID
pub fn store_remove_inventory_item(store: &AppStore, item_id: &str) {
    store.inventory().write().retain(|item| item.id != item_id);
}

/// Reduce local stock after a sale until the next fetch
pub fn store_apply_sale(store: &AppStore, sold: &[(String, u32)]) {
    let inventory = store.inventory();
    let mut items = inventory.write();
    for (id, quantity) in sold {
        if let Some(item) = items.iter_mut().find(|i| &i.id == id) {
            item.quantity = (item.quantity - i64::from(*quantity)).max(0);
        }
    }
    InventoryCache::new(&BrowserStorage).adjust_stock(sold);
}
