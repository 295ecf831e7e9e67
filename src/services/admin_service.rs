// src/services/admin_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::admin::{default_name, Admin},
    services::auth_service,
};
use sqlx::SqlitePool;

pub const MIN_PASSWORD_LEN: usize = 6;

pub async fn find_admin_by_id(db_pool: &SqlitePool, admin_id: i64) -> AppResult<Option<Admin>> {
    tracing::debug!("Looking up admin by id: {}", admin_id);
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, name FROM admin WHERE id = ?1",
    )
    .bind(admin_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(admin)
}

pub async fn find_admin_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, name FROM admin WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await?;
    Ok(admin)
}

pub async fn find_all_admins(db_pool: &SqlitePool) -> AppResult<Vec<Admin>> {
    let admins = sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, name FROM admin ORDER BY id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Found {} admins.", admins.len());
    Ok(admins)
}

/// Creates an admin and returns its id. A taken email is a `Conflict`.
pub async fn create_admin(
    db_pool: &SqlitePool,
    email: &str,
    raw_password: &str,
    name: Option<&str>,
    bcrypt_cost: u32,
) -> AppResult<i64> {
    let email = email.trim();
    if email.is_empty() || raw_password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }
    let name = resolve_name(email, name);
    tracing::info!("Creating admin: {}", email);

    let password_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;

    let result = sqlx::query("INSERT INTO admin (email, password_hash, name) VALUES (?1, ?2, ?3)")
        .bind(email)
        .bind(&password_hash)
        .bind(&name)
        .execute(db_pool)
        .await;

    match result {
        Ok(done) => {
            let id = done.last_insert_rowid();
            tracing::info!("✅ Admin '{}' created with id {}.", email, id);
            Ok(id)
        }
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Admin creation failed: email '{}' already exists.", email);
            Err(AppError::Conflict("Email already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Updates email and name, re-hashing the password only when one is given.
/// The email check and the write are one statement guarded by the UNIQUE index.
pub async fn update_admin(
    db_pool: &SqlitePool,
    admin_id: i64,
    email: &str,
    raw_password: Option<&str>,
    name: Option<&str>,
    bcrypt_cost: u32,
) -> AppResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }
    let name = resolve_name(email, name);
    tracing::info!("Updating admin {}", admin_id);

    let password_hash = match raw_password.filter(|p| !p.is_empty()) {
        Some(p) => Some(auth_service::hash_password(p, bcrypt_cost).await?),
        None => None,
    };

    let result = sqlx::query(
        r#"
        UPDATE admin
        SET email = ?1,
            name = ?2,
            password_hash = COALESCE(?3, password_hash)
        WHERE id = ?4
        "#,
    )
    .bind(email)
    .bind(&name)
    .bind(password_hash)
    .bind(admin_id)
    .execute(db_pool)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => {
            tracing::warn!("Admin update failed: admin {} not found.", admin_id);
            Err(AppError::NotFound("Admin not found".into()))
        }
        Ok(_) => {
            tracing::info!("✅ Admin {} updated.", admin_id);
            Ok(())
        }
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Admin update failed: email '{}' belongs to another admin.", email);
            Err(AppError::Conflict("Email already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Returns whether a row was removed.
pub async fn delete_admin(db_pool: &SqlitePool, admin_id: i64) -> AppResult<bool> {
    let rows = sqlx::query("DELETE FROM admin WHERE id = ?1")
        .bind(admin_id)
        .execute(db_pool)
        .await?
        .rows_affected();
    tracing::info!("Delete admin {}: {} row(s) removed.", admin_id, rows);
    Ok(rows > 0)
}

/// Registration rules for the public sign-up form.
pub fn validate_registration(email: &str, password: &str, confirm: &str) -> AppResult<()> {
    if email.trim().is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(AppError::Validation("All fields are required".into()));
    }
    if password != confirm {
        return Err(AppError::Validation("Passwords do not match".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Creates the configured first admin unless that email already exists.
pub async fn ensure_bootstrap_admin(
    db_pool: &SqlitePool,
    email: &str,
    raw_password: &str,
    bcrypt_cost: u32,
) -> AppResult<()> {
    if find_admin_by_email(db_pool, email.trim()).await?.is_some() {
        tracing::debug!("Bootstrap admin '{}' already present.", email);
        return Ok(());
    }
    create_admin(db_pool, email, raw_password, None, bcrypt_cost).await?;
    tracing::info!("🔑 Bootstrap admin '{}' created.", email);
    Ok(())
}

fn resolve_name(email: &str, name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_name(email))
}
