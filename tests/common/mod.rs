#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use campus_attendance::{
    clock::Clock,
    db,
    media::MediaStore,
    models::student::StudentFields,
    services::{admin_service, student_service},
    state::AppState,
    web,
};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::Value;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use tower_sessions::cookie::Key;

pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "admin123";
/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_COST: u32 = 4;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn manila_at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

pub fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("{}-{}-{}-{}", prefix, std::process::id(), nanos, n))
}

pub async fn pool() -> SqlitePool {
    db::create_memory_pool().await.expect("in-memory pool")
}

pub fn fields(lastname: &str, firstname: &str, course: &str, level: &str) -> StudentFields {
    StudentFields {
        lastname: lastname.into(),
        firstname: firstname.into(),
        course: course.into(),
        level: level.into(),
    }
}

/// Inserts a student row directly, without media.
pub async fn insert_student(pool: &SqlitePool, id: &str) {
    sqlx::query("INSERT INTO students (id, lastname, firstname, course, level) VALUES (?1, 'Durano', 'Dennis', 'BSCPE', '3')")
        .bind(id)
        .execute(pool)
        .await
        .expect("insert student");
}

pub async fn insert_attendance(pool: &SqlitePool, student_id: &str, date: &str, time_in: &str) {
    sqlx::query("INSERT INTO attendance (student_id, date, time_in) VALUES (?1, ?2, ?3)")
        .bind(student_id)
        .bind(date)
        .bind(time_in)
        .execute(pool)
        .await
        .expect("insert attendance");
}

pub async fn count_attendance(pool: &SqlitePool, student_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE student_id = ?1")
        .bind(student_id)
        .fetch_one(pool)
        .await
        .expect("count attendance")
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub media_root: PathBuf,
}

impl TestApp {
    /// App with a fixed clock, one admin account and one student "0001".
    pub async fn spawn(now: DateTime<FixedOffset>) -> Self {
        let pool = pool().await;
        let media_root = temp_dir("campus-attendance-http");
        let state = AppState {
            db_pool: pool.clone(),
            media: MediaStore::new(&media_root),
            clock: Clock::Fixed(now),
            bcrypt_cost: TEST_COST,
        };

        admin_service::create_admin(&pool, ADMIN_EMAIL, ADMIN_PASSWORD, Some("Admin User"), TEST_COST)
            .await
            .expect("seed admin");
        student_service::create_student(
            &pool,
            &state.media,
            Some("0001"),
            &fields("Durano", "Dennis", "BSCPE", "3"),
            None,
        )
        .await
        .expect("seed student");

        let store = db::create_session_store(&pool).await.expect("session store");
        let key = Key::from(&[7u8; 64][..]);
        let router = web::routes::create_app(state, store, key);
        Self { router, pool, media_root }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, headers, body.to_vec())
    }

    pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(request).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    /// Logs in and returns the `name=value` cookie pair to send back.
    pub async fn login(&self) -> String {
        let body = format!(
            "email={}&password={}",
            urlencoding::encode(ADMIN_EMAIL),
            urlencoding::encode(ADMIN_PASSWORD)
        );
        let request = Request::post("/admin")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let (status, headers, _) = self.send(request).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "login should redirect");
        let cookie = headers
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();
        cookie.split(';').next().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.media_root);
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn send_json(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
