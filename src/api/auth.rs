//! Auth Endpoints

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

pub async fn login(client: &ApiClient, args: &LoginRequest<'_>) -> ApiResult<AuthResponse> {
    client.post("auth/login", args).await
}

pub async fn register(client: &ApiClient, args: &RegisterRequest<'_>) -> ApiResult<AuthResponse> {
    client.post("auth/register", args).await
}
