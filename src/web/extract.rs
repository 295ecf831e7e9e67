// src/web/extract.rs
use crate::error::AppError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections go through `AppError`, so a malformed body
/// gets the usual `{ success, message }` envelope instead of plain text.
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::Form` with the same rejection handling.
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct ApiForm<T>(pub T);
