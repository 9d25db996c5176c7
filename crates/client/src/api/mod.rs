//! Authentication endpoint client.
//!
//! The only network surface this crate owns: the login call whose outcome
//! feeds [`crate::session::SessionStore::login`], and the fire-and-forget
//! logout notification. Everything else the storefront talks to is outside
//! the state engine.

mod error;

pub use error::ApiError;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

/// Login request body, as the backend expects it.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful authentication payload.
///
/// `roles` carries namespaced wire tags (e.g. `"ROLE_ADMIN"`); the session
/// store maps them to [`sucre_store_core::Role`] at its boundary. An absent
/// list deserializes as empty rather than failing.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer credential.
    pub token: String,
    /// Username of the authenticated account.
    pub username: String,
    /// Wire-format role tags, possibly empty.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// HTTP client for the authentication endpoint pair.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:8080/api`).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Authenticate with username and password.
    ///
    /// # Errors
    ///
    /// Returns a distinguishable [`ApiError`] for invalid credentials (401),
    /// forbidden (403), server errors (5xx), unreachable server, and
    /// malformed response bodies.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(ApiError::Network)?;

        match response.status() {
            status if status.is_success() => {
                response.json::<AuthResponse>().await.map_err(ApiError::Parse)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::InvalidCredentials),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            status if status.is_server_error() => Err(ApiError::Server(status.as_u16())),
            status => Err(ApiError::Unexpected(status.as_u16())),
        }
    }

    /// Tell the server the session ended. Fire-and-forget.
    ///
    /// The request is spawned and never awaited; a failure is logged and
    /// discarded because local logout must always succeed. Must be called
    /// from within a Tokio runtime.
    pub fn notify_logout(&self, token: &str) {
        let request = self
            .http
            .post(self.endpoint("auth/logout"))
            .bearer_auth(token);

        tokio::spawn(async move {
            match request.send().await {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "logout notification sent");
                }
                Err(e) => {
                    tracing::warn!("logout notification failed: {e}");
                }
            }
        });
    }
}
