//! Shopping Cart
//!
//! Pending bill lines, persisted to local storage after every change.

use serde::{Deserialize, Serialize};

use crate::models::InventoryItem;
use crate::storage::{self, KeyValueStore};

const CART_KEY: &str = "cart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// Stock available when the line was added
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    fn cap(&self, quantity: u32) -> u32 {
        self.max_quantity.map_or(quantity, |max| quantity.min(max))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Restore the persisted cart; corrupt data yields an empty cart
    pub fn load(store: &impl KeyValueStore) -> Self {
        storage::load_json(store, CART_KEY).unwrap_or_default()
    }

    pub fn persist(&self, store: &impl KeyValueStore) {
        if self.lines.is_empty() {
            store.remove(CART_KEY);
        } else {
            storage::save_json(store, CART_KEY, self);
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product, merging with an existing line and capping at stock.
    /// Returns false when nothing could be added.
    pub fn add(&mut self, item: &InventoryItem, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let stock = u32::try_from(item.quantity.max(0)).unwrap_or(u32::MAX);
        if stock == 0 {
            return false;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == item.id) {
            line.max_quantity = Some(stock);
            let next = line.cap(line.quantity.saturating_add(quantity));
            let changed = next != line.quantity;
            line.quantity = next;
            return changed;
        }

        let mut line = CartLine {
            product_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 0,
            max_quantity: Some(stock),
        };
        line.quantity = line.cap(quantity);
        self.lines.push(line);
        true
    }

    /// Set a line's quantity; zero removes the line
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.cap(quantity);
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ(quantity × price)
    pub fn total(&self) -> f64 {
        crate::billing::subtotal(&self.lines)
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: &str, price: f64, stock: i64) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            name: format!("Product {}", id),
            price,
            quantity: stock,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        assert!(cart.add(&product("p1", 10.0, 50), 2));
        assert!(cart.add(&product("p1", 10.0, 50), 3));
        assert!(cart.add(&product("p2", 2.5, 50), 4));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 9);
        assert_eq!(cart.total(), 60.0);
    }

    #[test]
    fn test_add_caps_at_stock() {
        let mut cart = Cart::default();
        assert!(cart.add(&product("p1", 1.0, 3), 5));
        assert_eq!(cart.lines()[0].quantity, 3);
        assert!(!cart.add(&product("p1", 1.0, 3), 1));
        assert!(!cart.add(&product("p2", 1.0, 0), 1));
        assert!(!cart.add(&product("p3", 1.0, 10), 0));
    }

    #[test]
    fn test_missing_stock_counts_as_sold_out() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"_id":"p9","name":"Tile","price":40}"#).unwrap();
        assert_eq!(item.quantity, 0);
        let mut cart = Cart::default();
        assert!(!cart.add(&item, 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restored_line_without_cap_is_uncapped() {
        let mut cart: Cart =
            serde_json::from_str(r#"[{"productId":"p1","name":"Tile","price":40,"quantity":2}]"#)
                .unwrap();
        cart.set_quantity("p1", 500);
        assert_eq!(cart.lines()[0].quantity, 500);
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let mut cart = Cart::default();
        cart.add(&product("p1", 4.0, 10), 1);
        cart.add(&product("p2", 6.0, 10), 1);

        cart.set_quantity("p1", 20);
        assert_eq!(cart.lines()[0].quantity, 10);

        cart.set_quantity("p1", 0);
        assert_eq!(cart.lines().len(), 1);

        cart.remove("p2");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_persistence() {
        let store = MemoryStorage::default();
        let mut cart = Cart::default();
        cart.add(&product("p1", 12.5, 10), 2);
        cart.persist(&store);

        let restored = Cart::load(&store);
        assert_eq!(restored, cart);

        cart.clear();
        cart.persist(&store);
        assert!(!store.contains("cart"));

        store.set("cart", "oops");
        assert!(Cart::load(&store).is_empty());
    }
}
