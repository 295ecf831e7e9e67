// src/services/student_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    media::{MediaStore, StudentMedia},
    models::student::{is_valid_student_id, Student, StudentFields},
};
use sqlx::SqlitePool;

/// Candidates "0001".."9999" in ascending order, minus the IDs already taken.
/// Shared by the advisory lookup and the allocating insert.
const FREE_IDS_CTE: &str = r#"
    WITH RECURSIVE seq(n) AS (
        SELECT 1
        UNION ALL
        SELECT n + 1 FROM seq WHERE n < 9999
    )
"#;

const FREE_IDS_FILTER: &str = r#"
    FROM seq
    WHERE printf('%04d', n) NOT IN (SELECT id FROM students)
    ORDER BY n
    LIMIT 1
"#;

/// Smallest unused 4-digit ID, or `None` once all 9,999 are taken.
///
/// Advisory only: nothing is reserved. `create_student` without an ID
/// allocates and inserts in one statement instead.
pub async fn generate_student_id(db_pool: &SqlitePool) -> AppResult<Option<String>> {
    let sql = format!("{FREE_IDS_CTE} SELECT printf('%04d', n) {FREE_IDS_FILTER}");
    let id = sqlx::query_scalar::<_, String>(&sql)
        .fetch_optional(db_pool)
        .await?;
    match &id {
        Some(id) => tracing::debug!("Next free student id: {}", id),
        None => tracing::warn!("Student id space exhausted."),
    }
    Ok(id)
}

pub async fn find_student_by_id(db_pool: &SqlitePool, student_id: &str) -> AppResult<Option<Student>> {
    tracing::debug!("Looking up student: {}", student_id);
    let student = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, lastname, firstname, course, level, photo, qr_code
        FROM students
        WHERE id = ?1
        "#,
    )
    .bind(student_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

pub async fn find_all_students(db_pool: &SqlitePool) -> AppResult<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, lastname, firstname, course, level, photo, qr_code
        FROM students
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Found {} students.", students.len());
    Ok(students)
}

/// Inserts a student, writes its photo and QR code, and records their paths.
///
/// With `requested_id == None` the smallest free ID is allocated inside the
/// INSERT itself. If the media cannot be written the row is removed again.
pub async fn create_student(
    db_pool: &SqlitePool,
    media: &MediaStore,
    requested_id: Option<&str>,
    fields: &StudentFields,
    photo: Option<&[u8]>,
) -> AppResult<Student> {
    if fields.missing_any() {
        return Err(AppError::Validation("All fields are required".into()));
    }

    let student_id = match requested_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => {
            if !is_valid_student_id(id) {
                return Err(AppError::Validation(
                    "Student ID must be a 4-digit number between 0001 and 9999".into(),
                ));
            }
            insert_with_id(db_pool, id, fields).await?;
            id.to_string()
        }
        None => insert_with_generated_id(db_pool, fields).await?,
    };

    let written = match media.save_student_media(&student_id, photo).await {
        Ok(written) => written,
        Err(e) => {
            tracing::error!("Media for student {} could not be written, rolling back.", student_id);
            delete_student(db_pool, &student_id).await?;
            return Err(e);
        }
    };

    if let Err(e) = set_media_paths(db_pool, &student_id, &written).await {
        media.remove(&written).await;
        delete_student(db_pool, &student_id).await?;
        return Err(e);
    }

    tracing::info!("✅ Student '{}' created.", student_id);
    Ok(Student {
        id: student_id,
        lastname: fields.lastname.clone(),
        firstname: fields.firstname.clone(),
        course: fields.course.clone(),
        level: fields.level.clone(),
        photo: written.photo,
        qr_code: written.qr_code,
    })
}

async fn insert_with_id(db_pool: &SqlitePool, student_id: &str, fields: &StudentFields) -> AppResult<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO students (id, lastname, firstname, course, level)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(student_id)
    .bind(&fields.lastname)
    .bind(&fields.firstname)
    .bind(&fields.course)
    .bind(&fields.level)
    .execute(db_pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Student creation failed: id '{}' already exists.", student_id);
            Err(AppError::Conflict("Student ID already exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn insert_with_generated_id(db_pool: &SqlitePool, fields: &StudentFields) -> AppResult<String> {
    let sql = format!(
        "{FREE_IDS_CTE} INSERT INTO students (id, lastname, firstname, course, level) \
         SELECT printf('%04d', n), ?1, ?2, ?3, ?4 {FREE_IDS_FILTER} RETURNING id"
    );
    let id = sqlx::query_scalar::<_, String>(&sql)
        .bind(&fields.lastname)
        .bind(&fields.firstname)
        .bind(&fields.course)
        .bind(&fields.level)
        .fetch_optional(db_pool)
        .await?;

    id.ok_or_else(|| {
        tracing::warn!("Student creation failed: no free student id left.");
        AppError::Conflict("Unable to generate student ID".into())
    })
}

async fn set_media_paths(db_pool: &SqlitePool, student_id: &str, media: &StudentMedia) -> AppResult<()> {
    sqlx::query("UPDATE students SET photo = ?1, qr_code = ?2 WHERE id = ?3")
        .bind(&media.photo)
        .bind(&media.qr_code)
        .bind(student_id)
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Changes names, course and level. The ID itself is immutable.
pub async fn update_student(db_pool: &SqlitePool, student_id: &str, fields: &StudentFields) -> AppResult<()> {
    if fields.missing_any() {
        return Err(AppError::Validation("All fields are required".into()));
    }
    tracing::info!("Updating student: {}", student_id);

    let rows_affected = sqlx::query(
        r#"
        UPDATE students
        SET firstname = ?1, lastname = ?2, course = ?3, level = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&fields.firstname)
    .bind(&fields.lastname)
    .bind(&fields.course)
    .bind(&fields.level)
    .bind(student_id)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Student update failed: '{}' not found.", student_id);
        Err(AppError::NotFound("Student not found".into()))
    } else {
        Ok(())
    }
}

/// Removes the student row only; attendance history is left in place.
pub async fn delete_student(db_pool: &SqlitePool, student_id: &str) -> AppResult<bool> {
    let rows = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(student_id)
        .execute(db_pool)
        .await?
        .rows_affected();
    tracing::info!("Delete student {}: {} row(s) removed.", student_id, rows);
    Ok(rows > 0)
}
