//! Typed configuration for the auth flow.
//!
//! WASM bundles have no runtime environment, so the only override is the
//! compile-time `AUTH_API_BASE_URL`; everything else uses fixed defaults that
//! match the backend's cookie and route contract.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
pub const ACCESS_TOKEN_COOKIE: &str = "nextauth.token";
pub const REFRESH_TOKEN_COOKIE: &str = "nextauth.refreshToken";
/// Thirty days.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;
pub const AUTH_CHANNEL_NAME: &str = "auth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    pub access_token_cookie: String,
    pub refresh_token_cookie: String,
    pub cookie_max_age_secs: i64,
    pub cookie_path: String,
    /// Name of the cross-tab broadcast channel.
    pub channel_name: String,
    /// Route shown to signed-out visitors.
    pub landing_route: String,
    /// Route navigated to after a successful sign-in.
    pub authenticated_route: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            access_token_cookie: ACCESS_TOKEN_COOKIE.to_owned(),
            refresh_token_cookie: REFRESH_TOKEN_COOKIE.to_owned(),
            cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
            cookie_path: "/".to_owned(),
            channel_name: AUTH_CHANNEL_NAME.to_owned(),
            landing_route: "/".to_owned(),
            authenticated_route: "/dashboard".to_owned(),
        }
    }
}

impl AuthConfig {
    /// Build config from compile-time environment.
    ///
    /// Optional:
    /// - `AUTH_API_BASE_URL`: backend base URL (default `http://localhost:3333`)
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::default().with_api_base_url(option_env!("AUTH_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Replace the base URL, normalizing away trailing slashes and blank input.
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() { DEFAULT_API_BASE_URL.to_owned() } else { trimmed.to_owned() };
        self
    }
}
