// src/clock.rs
use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 12-hour clock with AM/PM marker, e.g. `09:05 AM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Source of "now" in the civil timezone attendance is recorded in.
#[derive(Clone, Debug)]
pub enum Clock {
    System(FixedOffset),
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    pub fn system(utc_offset_minutes: i32) -> AppResult<Self> {
        FixedOffset::east_opt(utc_offset_minutes * 60)
            .map(Clock::System)
            .ok_or_else(|| {
                AppError::Config(format!("UTC offset out of range: {} minutes", utc_offset_minutes))
            })
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::System(offset) => Utc::now().with_timezone(offset),
            Clock::Fixed(at) => *at,
        }
    }

    pub fn today(&self) -> String {
        format_date(&self.now())
    }
}

pub fn format_date(at: &DateTime<FixedOffset>) -> String {
    at.format(DATE_FORMAT).to_string()
}

pub fn format_time(at: &DateTime<FixedOffset>) -> String {
    at.format(TIME_FORMAT).to_string()
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()
}

/// Accepts only `YYYY-MM-DD` and returns it normalized.
pub fn validate_date(raw: &str) -> AppResult<String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| AppError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}
