// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::admin::{LoginForm, RegisterForm},
    services::{admin_service, auth_service},
    state::AppState,
    templates::{LoginPage, RegisterPage},
    web::{extract::ApiForm, mw_auth::ADMIN_SESSION_KEY},
};
use askama::Template;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

const NO_STORE: &str = "no-store, no-cache, must-revalidate, max-age=0";

#[derive(Deserialize, Debug)]
pub struct FeedbackParams {
    success: Option<String>,
    error: Option<String>,
}

/// Renders a page with caching disabled so the Back button cannot show stale admin screens.
pub(crate) fn render_page<T: Template>(template: &T) -> AppResult<Response> {
    let html = template.render().map_err(|e| {
        tracing::error!("Template rendering failed: {}", e);
        AppError::InternalServerError
    })?;
    Ok(([(header::CACHE_CONTROL, NO_STORE)], Html(html)).into_response())
}

// GET /admin
pub async fn show_login_form(
    session: Session,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    // Already logged in: skip the form
    if session.get::<i64>(ADMIN_SESSION_KEY).await.ok().flatten().is_some() {
        tracing::debug!("GET /admin: already logged in, redirecting");
        return Ok(Redirect::to("/admin/attendance").into_response());
    }
    // Feedback arrives as query params from redirects (e.g. after registration)
    render_page(&LoginPage {
        error: params.error,
        success: params.success,
    })
}

// POST /admin
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    ApiForm(form): ApiForm<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for: {}", form.email);

    match auth_service::authenticate(&state.db_pool, &form.email, &form.password).await {
        Ok(admin) => {
            // New session id on login (fixation)
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::SessionError(format!("cycling session id: {}", e)))?;
            session
                .insert(ADMIN_SESSION_KEY, admin.id)
                .await
                .map_err(|e| AppError::SessionError(format!("writing session: {}", e)))?;
            tracing::info!("✅ Admin {} logged in.", admin.id);
            // 303 so the browser follows with a GET
            Ok(Redirect::to("/admin/attendance").into_response())
        }
        Err(AppError::InvalidCredentials) => {
            // Same message for unknown email and wrong password
            let mut response = render_page(&LoginPage {
                error: Some("Invalid email or password".to_string()),
                success: None,
            })?;
            *response.status_mut() = axum::http::StatusCode::UNAUTHORIZED;
            Ok(response)
        }
        // Hashing or database failure: propagate as 500
        Err(e) => Err(e),
    }
}

// GET /admin/logout
pub async fn handle_logout(session: Session) -> AppResult<Response> {
    // Read before deleting, for the log line only
    let admin_id: Option<i64> = session.get(ADMIN_SESSION_KEY).await.ok().flatten();

    // Removes the stored row as well as the cookie
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("deleting session: {}", e)))?;

    match admin_id {
        Some(id) => tracing::info!("🚪 Admin {} logged out.", id),
        None => tracing::info!("🚪 Anonymous session logged out."),
    }

    Ok(([(header::CACHE_CONTROL, NO_STORE)], Redirect::to("/admin")).into_response())
}

// GET /register
pub async fn show_register_form() -> AppResult<Response> {
    render_page(&RegisterPage { error: None })
}

// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<RegisterForm>,
) -> AppResult<Response> {
    tracing::info!("Registration attempt for: {}", form.email);

    // Field rules first, then the insert (which enforces the unique email)
    let result = match admin_service::validate_registration(
        &form.email,
        &form.password,
        &form.confirm_password,
    ) {
        Ok(()) => {
            admin_service::create_admin(
                &state.db_pool,
                &form.email,
                &form.password,
                None,
                state.bcrypt_cost,
            )
            .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => {
            let msg = urlencoding::encode("Account created, you can now log in.");
            Ok(Redirect::to(&format!("/admin?success={}", msg)).into_response())
        }
        // Caller mistakes re-render the form with the message
        Err(e @ (AppError::Validation(_) | AppError::Conflict(_))) => {
            let mut response = render_page(&RegisterPage {
                error: Some(e.public_message()),
            })?;
            *response.status_mut() = e.status_code();
            Ok(response)
        }
        Err(e) => Err(e),
    }
}
