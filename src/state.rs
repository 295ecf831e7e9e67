// src/state.rs
use crate::{clock::Clock, media::MediaStore};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub media: MediaStore,
    // Local time source for attendance dates.
    pub clock: Clock,
    pub bcrypt_cost: u32,
}

// Lets handlers extract the pool directly
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
