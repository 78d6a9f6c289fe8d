//! Types for authentication and identity

use serde::{Deserialize, Serialize};

/// Role of an identity; gates the admin surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Plain customer
    User,
    /// Administrator; may manage products and orders
    Admin,
}

/// A signed-in identity as the backend reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    #[serde(rename = "_id")]
    pub id: String,

    /// The sign-in name
    pub username: String,

    /// Display name, when the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The user's role
    pub role: Role,
}

impl User {
    /// Whether this identity carries the administrator role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Credentials for sign-in and sign-up
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// The sign-in name
    pub username: String,
    /// The password, sent as-is over the wire
    pub password: String,
}

impl Credentials {
    /// Create new credentials
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Wire response of `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token
    pub token: String,
    /// The signed-in identity
    pub user: User,
}

/// An authenticated session: the opaque bearer token plus its identity.
///
/// The token is trusted as-is after a restore; it is never re-validated
/// against the backend until a call is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token attached to authenticated calls
    pub token: String,
    /// The identity the token belongs to
    pub user: User,
}
