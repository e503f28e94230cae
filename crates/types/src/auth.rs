//! Login credentials, the issued access token, and the authenticated profile.

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The artifact of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    pub access_token: String,
}

impl Auth {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Email/password pair posted to the login endpoint.
///
/// The password is kept as a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// JSON body for the login request. This is the only place the password is exposed.
    #[must_use]
    pub fn login_body(&self) -> Value {
        json!({
            "email": self.email,
            "password": self.password.expose_secret(),
        })
    }
}

/// Profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "crate::product::id_from_any")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
