//! Employee Endpoints

use super::{ApiClient, ListResponse};
use crate::error::ApiResult;
use crate::models::Employee;

pub async fn list_employees(client: &ApiClient) -> ApiResult<Vec<Employee>> {
    Ok(client.get::<ListResponse<Employee>>("employees").await?.into_vec())
}
