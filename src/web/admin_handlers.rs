// src/web/admin_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::admin::{AdminPayload, AdminView},
    services::admin_service,
    state::AppState,
    web::{extract::ApiJson, mw_auth::AdminId},
};
use axum::{
    extract::{Extension, Json, Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;

// GET /api/admins
pub async fn list_admins(State(db_pool): State<SqlitePool>) -> AppResult<impl IntoResponse> {
    let admins: Vec<AdminView> = admin_service::find_all_admins(&db_pool)
        .await?
        .into_iter()
        .map(AdminView::from)
        .collect();
    Ok(Json(json!({ "success": true, "admins": admins })))
}

// POST /api/admin/add
pub async fn add_admin(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AdminPayload>,
) -> AppResult<impl IntoResponse> {
    let password = payload.password.as_deref().unwrap_or_default();
    let id = admin_service::create_admin(
        &state.db_pool,
        &payload.email,
        password,
        payload.name.as_deref(),
        state.bcrypt_cost,
    )
    .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Admin user added successfully",
        "id": id,
    })))
}

// GET /api/admin/get/{id}
pub async fn get_admin(
    State(db_pool): State<SqlitePool>,
    Path(admin_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let admin = admin_service::find_admin_by_id(&db_pool, admin_id)
        .await?
        .map(AdminView::from)
        .ok_or_else(|| AppError::NotFound("Admin not found".into()))?;
    Ok(Json(json!({ "success": true, "admin": admin })))
}

// PUT|POST /api/admin/update/{id}
pub async fn update_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<i64>,
    ApiJson(payload): ApiJson<AdminPayload>,
) -> AppResult<impl IntoResponse> {
    admin_service::update_admin(
        &state.db_pool,
        admin_id,
        &payload.email,
        payload.password.as_deref(),
        payload.name.as_deref(),
        state.bcrypt_cost,
    )
    .await?;
    Ok(Json(json!({ "success": true, "message": "Admin user updated successfully" })))
}

// DELETE|POST /api/admin/delete/{id}
pub async fn delete_admin(
    State(db_pool): State<SqlitePool>,
    Extension(AdminId(acting_admin)): Extension<AdminId>,
    Path(admin_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Admin {} deleting admin {}.", acting_admin, admin_id);
    if !admin_service::delete_admin(&db_pool, admin_id).await? {
        return Err(AppError::NotFound("Admin not found".into()));
    }
    Ok(Json(json!({ "success": true, "message": "Admin user deleted successfully" })))
}
