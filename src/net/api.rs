//! REST calls against the backend session endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and tests: `HttpAuthApi` returns
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser; tests substitute their own [`AuthApi`].
//!
//! Credentials are an explicit argument on every authenticated call. No
//! default header lives on the client.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{Credentials, MeResponse, SessionResponse};
use crate::config::AuthConfig;
use crate::error::ApiError;

pub const SESSIONS_PATH: &str = "sessions";
pub const ME_PATH: &str = "me";

/// Backend operations the session controller depends on.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a token pair via `POST sessions`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    async fn create_session(&self, credentials: &Credentials) -> Result<SessionResponse, ApiError>;

    /// Fetch the user owning `access_token` via `GET /me`.
    ///
    /// # Errors
    ///
    /// Same as [`AuthApi::create_session`]; expired tokens surface as
    /// [`ApiError::Status`].
    async fn me(&self, access_token: &str) -> Result<MeResponse, ApiError>;
}

/// `Authorization` header value for an access token.
pub fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Join `base_url` and a relative endpoint path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// HTTP implementation of [`AuthApi`] bound to a base URL.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(ApiError::Status { status: resp.status() });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn create_session(&self, credentials: &Credentials) -> Result<SessionResponse, ApiError> {
        let url = self.url(SESSIONS_PATH);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&url)
                .json(credentials)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            decode(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, credentials);
            Err(ApiError::Unavailable)
        }
    }

    async fn me(&self, access_token: &str) -> Result<MeResponse, ApiError> {
        let url = self.url(ME_PATH);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer(access_token))
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            decode(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, access_token);
            Err(ApiError::Unavailable)
        }
    }
}
