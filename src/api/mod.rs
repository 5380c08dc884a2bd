//! Backend API
//!
//! Bearer-authenticated fetch wrapper and per-domain endpoint bindings.

mod auth;
mod inventory;
mod customers;
mod bills;
mod expenses;
mod home_screen;
mod employees;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;
use crate::storage::{BrowserStorage, KeyValueStore};

// Re-export all public items
pub use auth::*;
pub use inventory::*;
pub use customers::*;
pub use bills::*;
pub use expenses::*;
pub use home_screen::*;
pub use employees::*;

/// Error body shape used by the backend
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.message)
}

/// Map an HTTP status to the error taxonomy; 2xx is `Ok`
pub fn classify_status(status: u16, body: &str) -> ApiResult<()> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized { message: backend_message(body) }),
        500..=u16::MAX => Err(ApiError::Server { status }),
        _ => {
            let message = backend_message(body)
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            Err(ApiError::Client { status, message })
        }
    }
}

/// Login and register answer 401 for bad credentials, not for a stale token
pub fn is_auth_path(path: &str) -> bool {
    path.trim_start_matches('/').starts_with("auth/")
}

/// Classify a response; a 401 outside `auth/*` drops the stored session.
/// Returns whether the session was dropped.
pub fn check_status(
    status: u16,
    body: &str,
    path: &str,
    store: &impl KeyValueStore,
) -> (ApiResult<()>, bool) {
    let result = classify_status(status, body);
    let expired = matches!(&result, Err(e) if e.is_unauthorized()) && !is_auth_path(path);
    if expired {
        log::warn!("401 from backend on {}, clearing session", path);
        SessionStore::new(store).clear();
    }
    (result, expired)
}

/// Percent-encode a record id for use as a path segment
pub fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

/// HTTP client bound to the configured backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    on_unauthorized: Option<Callback<()>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), on_unauthorized: None }
    }

    /// Callback run after a 401 has cleared the session
    pub fn with_unauthorized_hook(mut self, hook: Callback<()>) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match SessionStore::new(&BrowserStorage).token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(&self, path: &str, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if response.ok() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let (result, expired) = check_status(status, &body, path, &BrowserStorage);
        if expired {
            if let Some(hook) = &self.on_unauthorized {
                hook.run(());
            }
        }
        result.map(|_| response)
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> ApiResult<Response> {
        let response = self.authorize(builder).send().await?;
        self.check(path, response).await
    }

    async fn send_json<B: Serialize>(
        &self,
        path: &str,
        builder: RequestBuilder,
        body: &B,
    ) -> ApiResult<Response> {
        let request: Request = self.authorize(builder).json(body)?;
        let response = request.send().await?;
        self.check(path, response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(path, Request::get(&self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let response = self.send(path, Request::get(&self.url(path))).await?;
        Ok(response.binary().await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send_json(path, Request::post(&self.url(path)), body).await?;
        Ok(response.json().await?)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send_json(path, Request::put(&self.url(path)), body).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(path, Request::delete(&self.url(path))).await?;
        Ok(())
    }
}

/// Accepts either a bare array or `{ "data": [...] }` style envelopes
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) | ListResponse::Wrapped { data: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use crate::session::Session;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200, ""), Ok(()));
        assert_eq!(classify_status(204, ""), Ok(()));
        assert_eq!(classify_status(401, ""), Err(ApiError::Unauthorized { message: None }));
        assert_eq!(classify_status(503, "<html>"), Err(ApiError::Server { status: 503 }));
        assert_eq!(
            classify_status(400, r#"{"message":"Name is required"}"#),
            Err(ApiError::Client { status: 400, message: "Name is required".into() })
        );
        assert_eq!(
            classify_status(404, "Not Found"),
            Err(ApiError::Client { status: 404, message: "Request failed with status 404".into() })
        );
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let store = MemoryStorage::default();
        let sessions = SessionStore::new(&store);
        sessions.save(&Session {
            token: "t".into(),
            user: User {
                id: "1".into(),
                name: "A".into(),
                email: "a@b.in".into(),
                role: Role::Staff,
            },
        });

        assert!(check_status(500, "", "inventory", &store).0.is_err());
        assert!(sessions.load().is_some());

        let (result, expired) = check_status(401, "", "inventory", &store);
        assert_eq!(result, Err(ApiError::Unauthorized { message: None }));
        assert!(expired);
        assert!(!store.contains("token"));
        assert!(!store.contains("user"));
    }

    #[test]
    fn test_login_rejection_keeps_message_and_session() {
        let body = r#"{"message":"Invalid email or password"}"#;
        assert_eq!(classify_status(401, body).unwrap_err().banner(), "Invalid email or password");

        let store = MemoryStorage::default();
        store.set("token", "previous");
        let (result, expired) = check_status(401, body, "auth/login", &store);
        assert!(!expired);
        assert!(store.contains("token"));
        assert_eq!(
            result,
            Err(ApiError::Unauthorized { message: Some("Invalid email or password".into()) })
        );
        assert!(is_auth_path("/auth/register"));
        assert!(!is_auth_path("customers"));
    }

    #[test]
    fn test_url_and_segments() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.url("/inventory"), "http://localhost:5000/api/inventory");
        assert_eq!(path_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_list_envelopes() {
        let bare: ListResponse<u8> = serde_json::from_str("[1,2]").unwrap();
        let wrapped: ListResponse<u8> = serde_json::from_str(r#"{"data":[3]}"#).unwrap();
        let items: ListResponse<u8> = serde_json::from_str(r#"{"items":[4],"total":1}"#).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);
        assert_eq!(wrapped.into_vec(), vec![3]);
        assert_eq!(items.into_vec(), vec![4]);
    }
}
