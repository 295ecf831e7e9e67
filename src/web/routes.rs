// src/web/routes.rs
use crate::{
    state::AppState,
    web::{admin_handlers, attendance_handlers, auth_handlers, mw_auth, student_handlers},
};
use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

pub fn create_router() -> Router<AppState> {
    // --- Public routes ---
    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::permanent("/admin") }))
        // Login form and its submission share the path
        .route("/admin", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/admin/logout", get(auth_handlers::handle_logout))
        // Self-service admin registration
        .route("/register", get(auth_handlers::show_register_form).post(auth_handlers::handle_register))
        // Scanner kiosk posts here without a session (JSON: { "student_id": "0001" })
        .route("/api/scan-attendance", post(attendance_handlers::scan_attendance));

    // --- Admin pages (redirect to login when anonymous) ---
    let admin_pages = Router::new()
        // Daily view (URL: /admin/attendance?date=2025-06-02)
        .route("/admin/attendance", get(attendance_handlers::attendance_page))
        // Maintenance: plain-text count of purged rows
        .route(
            "/admin/delete_future_attendance",
            get(attendance_handlers::delete_future_attendance),
        )
        // route_layer: only matched routes are guarded, so unknown paths still 404
        .route_layer(middleware::from_fn(mw_auth::require_admin));

    // --- Admin JSON API (401 when anonymous) ---
    // Paths below are relative; the router is nested under /api
    let admin_api = Router::new()
        // Students
        .route("/students", get(student_handlers::list_students))
        .route("/student/generate-id", get(student_handlers::generate_student_id))
        // Without "student_id" in the body the next free ID is allocated
        .route("/student/add", post(student_handlers::add_student))
        .route("/student/get/{id}", get(student_handlers::get_student))
        .route("/student/update/{id}", post(student_handlers::update_student))
        .route(
            "/student/delete/{id}",
            post(student_handlers::delete_student).delete(student_handlers::delete_student),
        )
        // Attendance (URL: /api/attendance?date=2025-06-02, defaults to today)
        .route("/attendance", get(attendance_handlers::attendance_by_date))
        .route("/attendance/all", get(attendance_handlers::all_attendance))
        .route(
            "/attendance/delete/{id}",
            post(attendance_handlers::delete_attendance).delete(attendance_handlers::delete_attendance),
        )
        // Admin accounts; password hashes never leave the server
        .route("/admins", get(admin_handlers::list_admins))
        .route("/admin/add", post(admin_handlers::add_admin))
        .route("/admin/get/{id}", get(admin_handlers::get_admin))
        .route(
            "/admin/update/{id}",
            post(admin_handlers::update_admin).put(admin_handlers::update_admin),
        )
        .route(
            "/admin/delete/{id}",
            post(admin_handlers::delete_admin).delete(admin_handlers::delete_admin),
        )
        .route_layer(middleware::from_fn(mw_auth::require_admin_api));

    // --- Final router ---
    Router::new()
        .merge(public_routes)
        .merge(admin_pages)
        .nest("/api", admin_api)
}

/// Full application: routes, state, tracing and signed cookie sessions.
pub fn create_app(app_state: AppState, session_store: SqliteStore, key: Key) -> Router {
    // Signed cookie, session rows live in SQLite
    let session_layer = SessionManagerLayer::new(session_store)
        // Served over plain HTTP on the campus network
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(key);

    create_router().with_state(app_state).layer(
        // Outermost first: trace, then sessions
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
