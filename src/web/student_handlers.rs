// src/web/student_handlers.rs
use crate::{
    error::{AppError, AppResult},
    media::decode_photo,
    models::student::{NewStudentPayload, StudentFields},
    services::student_service,
    state::AppState,
    web::extract::ApiJson,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use serde_json::json;

// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let students = student_service::find_all_students(&state.db_pool).await?;
    Ok(Json(json!({ "success": true, "students": students })))
}

// GET /api/student/generate-id
pub async fn generate_student_id(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let student_id = student_service::generate_student_id(&state.db_pool)
        .await?
        .ok_or_else(|| AppError::Conflict("Unable to generate student ID".into()))?;
    Ok(Json(json!({ "success": true, "student_id": student_id })))
}

// POST /api/student/add
pub async fn add_student(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewStudentPayload>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("POST /api/student/add: {:?}", payload.student_id);

    // Decode before touching the database so a bad photo leaves nothing behind.
    let photo = match payload.photo.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(encoded) => Some(decode_photo(encoded)?),
        None => None,
    };

    let student = student_service::create_student(
        &state.db_pool,
        &state.media,
        payload.student_id.as_deref(),
        &payload.fields.trimmed(),
        photo.as_deref(),
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Student added successfully",
        "student_id": student.id,
        "photo_path": student.photo,
        "qr_path": student.qr_code,
    })))
}

// GET /api/student/get/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let student = student_service::find_student_by_id(&state.db_pool, &student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))?;
    Ok(Json(json!({ "success": true, "student": student })))
}

// POST /api/student/update/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    ApiJson(fields): ApiJson<StudentFields>,
) -> AppResult<impl IntoResponse> {
    student_service::update_student(&state.db_pool, &student_id, &fields.trimmed()).await?;
    Ok(Json(json!({ "success": true, "message": "Student updated successfully" })))
}

// DELETE|POST /api/student/delete/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !student_service::delete_student(&state.db_pool, &student_id).await? {
        return Err(AppError::NotFound("Student not found".into()));
    }
    Ok(Json(json!({ "success": true, "message": "Student deleted successfully" })))
}
