// src/services/attendance_service.rs
use crate::{
    clock::{format_date, format_time, parse_time},
    error::{AppError, AppResult},
    models::{
        attendance::{AttendanceEntry, AttendanceRecord, RecordOutcome},
        student::Student,
    },
    services::student_service,
};
use chrono::{DateTime, FixedOffset};
use sqlx::SqlitePool;
use std::cmp::Ordering;

/// Result of a scan: the day's record, who it belongs to, and whether it is new.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub record: AttendanceRecord,
    pub student: Student,
    pub outcome: RecordOutcome,
}

/// Records `student_id` as present on the local date of `now`.
///
/// The first scan of the day wins; later scans return that same row with
/// `AlreadyRecorded`. The UNIQUE (student_id, date) constraint makes the
/// insert-or-keep a single statement.
pub async fn record_attendance(
    db_pool: &SqlitePool,
    student_id: &str,
    now: DateTime<FixedOffset>,
) -> AppResult<ScanResult> {
    let student = student_service::find_student_by_id(db_pool, student_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Scan for unknown student: {}", student_id);
            AppError::NotFound("Student not found".into())
        })?;

    let date = format_date(&now);
    let time_in = format_time(&now);

    let inserted = sqlx::query(
        r#"
        INSERT INTO attendance (student_id, date, time_in)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(student_id, date) DO NOTHING
        "#,
    )
    .bind(student_id)
    .bind(&date)
    .bind(&time_in)
    .execute(db_pool)
    .await?
    .rows_affected();

    let outcome = if inserted > 0 {
        RecordOutcome::Recorded
    } else {
        RecordOutcome::AlreadyRecorded
    };

    let record = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, student_id, date, time_in
        FROM attendance
        WHERE student_id = ?1 AND date = ?2
        "#,
    )
    .bind(student_id)
    .bind(&date)
    .fetch_one(db_pool)
    .await?;

    tracing::info!(
        "Scan {} on {}: {:?} at {}",
        student_id,
        record.date,
        outcome,
        record.time_in
    );
    Ok(ScanResult { record, student, outcome })
}

/// Entries for one date, earliest first.
pub async fn find_attendance_by_date(db_pool: &SqlitePool, date: &str) -> AppResult<Vec<AttendanceEntry>> {
    let mut entries = sqlx::query_as::<_, AttendanceEntry>(
        r#"
        SELECT
            a.id,
            s.id AS student_id,
            s.lastname AS last,
            s.firstname AS first,
            s.course,
            s.level,
            a.date,
            a.time_in
        FROM attendance a
        JOIN students s ON a.student_id = s.id
        WHERE a.date = ?1
        ORDER BY a.time_in
        "#,
    )
    .bind(date)
    .fetch_all(db_pool)
    .await?;

    // time_in is a 12-hour string; the SQL order is wrong across noon.
    entries.sort_by(|a, b| compare_times(&a.time_in, &b.time_in));
    tracing::debug!("{} attendance entries on {}.", entries.len(), date);
    Ok(entries)
}

/// Every entry, newest date first and latest time first within a date.
pub async fn find_all_attendance(db_pool: &SqlitePool) -> AppResult<Vec<AttendanceEntry>> {
    let mut entries = sqlx::query_as::<_, AttendanceEntry>(
        r#"
        SELECT
            a.id,
            s.id AS student_id,
            s.lastname AS last,
            s.firstname AS first,
            s.course,
            s.level,
            a.date,
            a.time_in
        FROM attendance a
        JOIN students s ON a.student_id = s.id
        ORDER BY a.date DESC, a.time_in DESC
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| compare_times(&b.time_in, &a.time_in))
    });
    Ok(entries)
}

/// Returns whether a row was removed.
pub async fn delete_attendance(db_pool: &SqlitePool, attendance_id: i64) -> AppResult<bool> {
    let rows = sqlx::query("DELETE FROM attendance WHERE id = ?1")
        .bind(attendance_id)
        .execute(db_pool)
        .await?
        .rows_affected();
    tracing::info!("Delete attendance {}: {} row(s) removed.", attendance_id, rows);
    Ok(rows > 0)
}

/// Maintenance: drops every record dated after `today` and returns how many.
pub async fn delete_future_attendance(db_pool: &SqlitePool, today: &str) -> AppResult<u64> {
    let deleted = sqlx::query("DELETE FROM attendance WHERE date > ?1")
        .bind(today)
        .execute(db_pool)
        .await?
        .rows_affected();
    tracing::info!("🧹 {} future attendance entries deleted (today = {}).", deleted, today);
    Ok(deleted)
}

/// Orders by parsed clock time; unparseable values go last.
fn compare_times(a: &str, b: &str) -> Ordering {
    match (parse_time(a), parse_time(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
