// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Session key holding the logged-in admin's id.
pub const ADMIN_SESSION_KEY: &str = "admin_id";

/// Id of the authenticated admin, placed in request extensions.
#[derive(Clone, Copy, Debug)]
pub struct AdminId(pub i64);

async fn session_admin(session: &Session) -> Result<Option<i64>, AppError> {
    session
        .get::<i64>(ADMIN_SESSION_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("reading session: {}", e)))
}

/// For HTML pages: anonymous visitors are sent to the login page.
pub async fn require_admin(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session_admin(&session).await? {
        Some(admin_id) => {
            tracing::debug!("Auth MW: admin {} authenticated.", admin_id);
            request.extensions_mut().insert(AdminId(admin_id));
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Auth MW: no admin in session, redirecting to /admin");
            Ok(Redirect::to("/admin").into_response())
        }
    }
}

/// For the JSON API: anonymous callers get a 401 envelope.
pub async fn require_admin_api(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session_admin(&session).await? {
        Some(admin_id) => {
            request.extensions_mut().insert(AdminId(admin_id));
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!("API MW: unauthenticated call to {}", request.uri().path());
            Err(AppError::Unauthorized)
        }
    }
}
