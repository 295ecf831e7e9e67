// src/models/attendance.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: String,
    pub date: String,
    pub time_in: String,
}

/// Attendance joined with the student it belongs to, as listed to administrators.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceEntry {
    pub id: i64,
    pub student_id: String,
    pub last: String,
    pub first: String,
    pub course: String,
    pub level: String,
    pub date: String,
    pub time_in: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Recorded,
    AlreadyRecorded,
}

impl RecordOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RecordOutcome::Recorded => "Attendance recorded successfully",
            RecordOutcome::AlreadyRecorded => "Attendance already recorded for today",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanPayload {
    #[serde(default)]
    pub student_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}
