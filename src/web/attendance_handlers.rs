// src/web/attendance_handlers.rs
use crate::{
    clock::validate_date,
    error::{AppError, AppResult},
    models::attendance::{DateQuery, ScanPayload},
    services::attendance_service,
    state::AppState,
    templates::AttendancePage,
    web::{auth_handlers::render_page, extract::ApiJson, mw_auth::AdminId},
};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

// POST /api/scan-attendance
pub async fn scan_attendance(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ScanPayload>,
) -> AppResult<impl IntoResponse> {
    let student_id = payload
        .student_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("Student ID is required".into()))?;

    let scan = attendance_service::record_attendance(&state.db_pool, student_id, state.clock.now()).await?;

    Ok(Json(json!({
        "success": true,
        "status": scan.outcome,
        "message": scan.outcome.message(),
        "attendance": {
            "id": scan.record.id,
            "date": scan.record.date,
            "time_in": scan.record.time_in,
        },
        "student": {
            "id": scan.student.id,
            "firstname": scan.student.firstname,
            "lastname": scan.student.lastname,
            "course": scan.student.course,
            "level": scan.student.level,
        },
    })))
}

fn selected_date(state: &AppState, query: &DateQuery) -> AppResult<String> {
    match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => validate_date(raw),
        None => Ok(state.clock.today()),
    }
}

// GET /api/attendance?date=YYYY-MM-DD
pub async fn attendance_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<impl IntoResponse> {
    let date = selected_date(&state, &query)?;
    let entries = attendance_service::find_attendance_by_date(&state.db_pool, &date).await?;
    Ok(Json(json!({ "success": true, "date": date, "attendance": entries })))
}

// GET /api/attendance/all
pub async fn all_attendance(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let entries = attendance_service::find_all_attendance(&state.db_pool).await?;
    Ok(Json(json!({ "success": true, "attendance": entries })))
}

// DELETE|POST /api/attendance/delete/{id}
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(attendance_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    if !attendance_service::delete_attendance(&state.db_pool, attendance_id).await? {
        return Err(AppError::NotFound("Attendance record not found".into()));
    }
    Ok(Json(json!({ "success": true, "message": "Attendance record deleted successfully" })))
}

// GET /admin/delete_future_attendance
pub async fn delete_future_attendance(
    State(state): State<AppState>,
    Extension(AdminId(admin_id)): Extension<AdminId>,
) -> AppResult<String> {
    let today = state.clock.today();
    tracing::info!("Admin {} purging attendance dated after {}.", admin_id, today);
    let deleted = attendance_service::delete_future_attendance(&state.db_pool, &today).await?;
    Ok(format!("{} future attendance entries deleted.", deleted))
}

// GET /admin/attendance?date=YYYY-MM-DD
pub async fn attendance_page(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Response> {
    let date = match selected_date(&state, &query) {
        Ok(date) => date,
        Err(_) => {
            tracing::warn!("GET /admin/attendance: bad date {:?}, showing today", query.date);
            state.clock.today()
        }
    };
    let entries = attendance_service::find_attendance_by_date(&state.db_pool, &date).await?;
    render_page(&AttendancePage {
        selected_date: &date,
        entries: &entries,
    })
}
