//! Customer Endpoints

use super::{path_segment, ApiClient, ListResponse};
use crate::error::ApiResult;
use crate::models::Customer;

pub async fn list_customers(client: &ApiClient) -> ApiResult<Vec<Customer>> {
    Ok(client.get::<ListResponse<Customer>>("customers").await?.into_vec())
}

pub async fn create_customer(client: &ApiClient, customer: &Customer) -> ApiResult<Customer> {
    client.post("customers", customer).await
}

pub async fn update_customer(client: &ApiClient, customer: &Customer) -> ApiResult<Customer> {
    client.put(&format!("customers/{}", path_segment(&customer.id)), customer).await
}

pub async fn delete_customer(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("customers/{}", path_segment(id))).await
}
