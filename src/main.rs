// src/main.rs
use campus_attendance::{
    clock::Clock,
    config::Config,
    db,
    media::MediaStore,
    services::admin_service,
    state::AppState,
    web,
};
use axum::serve;
use std::env;
use tokio::net::TcpListener;
use tower_sessions::{cookie::Key, ExpiredDeletion};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first: RUST_LOG below and Config::from_env both read it.
    dotenvy::dotenv().ok();

    // --- Logging ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            env::var("RUST_LOG")
                .unwrap_or_else(|_| {
                    "campus_attendance=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
                })
                .into()
        }))
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Starting campus attendance server...");

    let config = Config::from_env()?;

    // --- Database ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Database initialisation failed: {}", e);
            return Err(anyhow::anyhow!("Failed to connect/migrate DB: {}", e));
        }
    };

    if let Some(bootstrap) = &config.bootstrap_admin {
        admin_service::ensure_bootstrap_admin(
            &db_pool,
            &bootstrap.email,
            &bootstrap.password,
            config.bcrypt_cost,
        )
        .await?;
    }

    // --- Sessions ---
    let session_store = db::create_session_store(&db_pool).await?;
    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = cleanup_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Session cleanup task failed: {:?}", e);
        }
    });
    tracing::info!("🧹 Session cleanup task started.");

    let key = Key::try_from(config.session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("SESSION_SECRET is not a usable signing key: {}", e))?;

    // --- Media ---
    let media = MediaStore::new(&config.media_dir);
    media.ensure_dirs().await?;
    tracing::info!("🖼️ Student media stored under {}", media.root().display());

    let app_state = AppState {
        db_pool,
        media,
        clock: Clock::system(config.utc_offset_minutes)?,
        bcrypt_cost: config.bcrypt_cost,
    };

    let app = web::routes::create_app(app_state, session_store, key);

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Could not bind {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Listening on http://{}", config.bind_addr);

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Fatal server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
