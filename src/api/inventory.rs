//! Inventory Endpoints
//!
//! Product CRUD; successful listings refresh the legacy local cache.

use super::{path_segment, ApiClient, ListResponse};
use crate::error::ApiResult;
use crate::inventory_cache::InventoryCache;
use crate::models::InventoryItem;
use crate::storage::BrowserStorage;

pub async fn list_inventory(client: &ApiClient) -> ApiResult<Vec<InventoryItem>> {
    let items = client.get::<ListResponse<InventoryItem>>("inventory").await?.into_vec();
    InventoryCache::new(&BrowserStorage).save(&items);
    Ok(items)
}

/// Inventory from the backend, or the cached copy when it is unreachable.
/// The flag is true when the cache was used.
pub async fn list_inventory_or_cached(client: &ApiClient) -> ApiResult<(Vec<InventoryItem>, bool)> {
    match list_inventory(client).await {
        Ok(items) => Ok((items, false)),
        Err(e) if e.is_unavailable() => {
            log::warn!("Inventory fetch failed ({}), using cached copy", e);
            Ok((InventoryCache::new(&BrowserStorage).load(), true))
        }
        Err(e) => Err(e),
    }
}

pub async fn create_inventory_item(
    client: &ApiClient,
    item: &InventoryItem,
) -> ApiResult<InventoryItem> {
    client.post("inventory", item).await
}

pub async fn update_inventory_item(
    client: &ApiClient,
    item: &InventoryItem,
) -> ApiResult<InventoryItem> {
    client.put(&format!("inventory/{}", path_segment(&item.id)), item).await
}

pub async fn delete_inventory_item(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("inventory/{}", path_segment(id))).await
}
