//! Expense Endpoints

use super::{path_segment, ApiClient, ListResponse};
use crate::error::ApiResult;
use crate::models::Expense;

pub async fn list_expenses(client: &ApiClient) -> ApiResult<Vec<Expense>> {
    Ok(client.get::<ListResponse<Expense>>("expenses").await?.into_vec())
}

pub async fn create_expense(client: &ApiClient, expense: &Expense) -> ApiResult<Expense> {
    client.post("expenses", expense).await
}

pub async fn update_expense(client: &ApiClient, expense: &Expense) -> ApiResult<Expense> {
    client.put(&format!("expenses/{}", path_segment(&expense.id)), expense).await
}

pub async fn delete_expense(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("expenses/{}", path_segment(id))).await
}
