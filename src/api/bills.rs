//! Bill Endpoints

use super::{path_segment, ApiClient, ListResponse};
use crate::error::ApiResult;
use crate::models::{Bill, NewBill};

pub async fn list_bills(client: &ApiClient) -> ApiResult<Vec<Bill>> {
    Ok(client.get::<ListResponse<Bill>>("bills").await?.into_vec())
}

pub async fn create_bill(client: &ApiClient, bill: &NewBill) -> ApiResult<Bill> {
    client.post("bills", bill).await
}

pub async fn delete_bill(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("bills/{}", path_segment(id))).await
}

/// Raw PDF bytes for a bill
pub async fn download_bill_pdf(client: &ApiClient, id: &str) -> ApiResult<Vec<u8>> {
    client.get_bytes(&format!("bills/{}/pdf", path_segment(id))).await
}
