//! Error types for the HTTP surface and the session state machine.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. API failures bubble up to the controller, which
//! degrades to the signed-out state and hands the error back to the caller so
//! the login form can render it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by backend requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request rejected: status {status}")]
    Status { status: u16 },

    #[error("response parse failed: {0}")]
    Decode(String),

    #[error("not available outside the browser")]
    Unavailable,
}

/// Errors returned by `sign_in` and session restore.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("a sign-in request is already in progress")]
    SignInPending,

    #[error("signed out while the request was pending")]
    Superseded,
}

impl AuthError {
    /// Message suitable for the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Status { status: 401 | 403 }) => "Invalid email or password.".to_owned(),
            Self::Api(ApiError::Transport(_) | ApiError::Unavailable) => {
                "Could not reach the server. Try again.".to_owned()
            }
            other => format!("Sign-in failed: {other}"),
        }
    }
}
