//! Campus attendance tracker.
//!
//! Administrators manage students (with photo and QR code) and admin accounts,
//! and review daily attendance. A scanner submits a student ID to
//! `POST /api/scan-attendance`; the first scan of the day is kept.
//!
//! # Layout
//! - `services`: SQL against the `students`, `attendance` and `admin` tables
//! - `web`: axum routes, handlers and session middleware
//! - `clock`, `media`, `config`, `db`: ambient plumbing
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod models;
pub mod services;
pub mod state;
pub mod templates;
pub mod web;
