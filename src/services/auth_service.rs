// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::admin::Admin,
    services::admin_service,
};
use sqlx::SqlitePool;

/// Checks a password against a stored bcrypt hash.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verifying bcrypt hash...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking task failed (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("bcrypt error while verifying password: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Hashes a password with bcrypt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Generating bcrypt hash...");
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking task failed (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("bcrypt error while hashing password: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Returns the admin whose email and password match, or `InvalidCredentials`.
pub async fn authenticate(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<Admin> {
    let admin = match admin_service::find_admin_by_email(db_pool, email.trim()).await? {
        Some(admin) => admin,
        None => {
            tracing::warn!("Login attempt for unknown email: {}", email);
            return Err(AppError::InvalidCredentials);
        }
    };

    if verify_password(password, &admin.password_hash).await? {
        Ok(admin)
    } else {
        tracing::warn!("Wrong password for admin {}", admin.id);
        Err(AppError::InvalidCredentials)
    }
}
