// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

/// Runtime settings, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_secret: String,
    pub media_dir: PathBuf,
    /// Offset of the civil timezone attendance is recorded in (Asia/Manila by default).
    pub utc_offset_minutes: i32,
    pub bcrypt_cost: u32,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Clone, Debug)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl Config {
    /// Reads the process environment; `main` loads `.env` into it first.
    pub fn from_env() -> AppResult<Self> {
        let database_url = required("DATABASE_URL")?;
        let session_secret = required("SESSION_SECRET")?;
        if session_secret.len() < 64 {
            return Err(AppError::Config(
                "SESSION_SECRET must be at least 64 bytes long".into(),
            ));
        }

        let bootstrap_admin = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => {
                tracing::warn!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together, ignoring both");
                None
            }
        };

        Ok(Self {
            database_url,
            bind_addr: parse_or("BIND_ADDR", "0.0.0.0:3000")?,
            session_secret,
            media_dir: PathBuf::from(optional("MEDIA_DIR").unwrap_or_else(|| "static".into())),
            utc_offset_minutes: parse_or("ATTENDANCE_UTC_OFFSET_MINUTES", "480")?,
            bcrypt_cost: parse_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())?,
            bootstrap_admin,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &str) -> AppResult<String> {
    optional(key).ok_or_else(|| AppError::Config(format!("{key} must be set")))
}

fn parse_or<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        tracing::debug!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| AppError::Config(format!("invalid {key} value '{raw}': {e}")))
}
