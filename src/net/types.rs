//! Wire DTOs for the backend session endpoints.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. `roles` is modelled as a
//! list; a bare string from older backends is accepted and wrapped.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// The signed-in user. Held only in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<String>,
}

/// Body of `POST sessions`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body of `POST sessions`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<String>,
}

impl SessionResponse {
    /// The user described by this response; the backend does not echo the email.
    pub fn user_for(&self, email: &str) -> User {
        User { email: email.to_owned(), permissions: self.permissions.clone(), roles: self.roles.clone() }
    }
}

/// Success body of `GET /me`.
pub type MeResponse = User;

#[derive(Deserialize)]
#[serde(untagged)]
enum RolesRepr {
    One(String),
    Many(Vec<String>),
}

fn deserialize_roles<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RolesRepr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RolesRepr::One(role)) if role.is_empty() => Vec::new(),
        Some(RolesRepr::One(role)) => vec![role],
        Some(RolesRepr::Many(roles)) => roles,
    })
}
