// src/models/admin.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `admin` table.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// What the API exposes of an admin; the hash never leaves the server.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminView {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<Admin> for AdminView {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    }
}

/// JSON body of the admin add/update endpoints.
#[derive(Debug, Deserialize)]
pub struct AdminPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Display name used when none is given: the local part of the email.
pub fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
