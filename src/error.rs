//! Error Types
//!
//! Failures from backend calls, classified for banner text.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: the token or the submitted credentials were rejected
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("token rejected"))]
    Unauthorized { message: Option<String> },

    #[error("Server error ({status})")]
    Server { status: u16 },

    #[error("Request failed ({status}): {message}")]
    Client { status: u16, message: String },

    /// Fetch never produced a response (offline, DNS, CORS)
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

impl ApiError {
    /// User-facing banner text
    pub fn banner(&self) -> String {
        match self {
            ApiError::Unauthorized { message } => {
                message.clone().unwrap_or_else(|| SESSION_EXPIRED.to_string())
            }
            ApiError::Server { .. } => {
                "The server ran into a problem. Please try again later.".to_string()
            }
            ApiError::Network(_) => {
                "Cannot reach the server. Check your connection or the backend CORS settings."
                    .to_string()
            }
            ApiError::Client { message, .. } => message.clone(),
            ApiError::Decode(_) => "Received an unexpected response from the server.".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Whether a cached copy is worth showing instead
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ApiError::Server { .. } | ApiError::Network(_))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_text_by_class() {
        assert!(ApiError::Server { status: 502 }.banner().contains("server ran into a problem"));
        assert!(ApiError::Network("TypeError".into()).banner().contains("Cannot reach"));
        let client = ApiError::Client { status: 409, message: "SKU already exists".into() };
        assert_eq!(client.banner(), "SKU already exists");
    }

    #[test]
    fn test_unauthorized_banner_keeps_backend_message() {
        let rejected = ApiError::Unauthorized { message: Some("Invalid email or password".into()) };
        assert_eq!(rejected.banner(), "Invalid email or password");
        assert_eq!(ApiError::Unauthorized { message: None }.banner(), SESSION_EXPIRED);
        assert!(rejected.is_unauthorized());
    }

    #[test]
    fn test_unavailable() {
        assert!(ApiError::Server { status: 500 }.is_unavailable());
        assert!(ApiError::Network(String::new()).is_unavailable());
        assert!(!ApiError::Unauthorized { message: None }.is_unavailable());
        assert!(!ApiError::Client { status: 404, message: String::new() }.is_unavailable());
    }
}
