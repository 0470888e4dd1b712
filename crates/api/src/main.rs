mod auth;
mod config;
mod error;
mod form;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use book_site_core::blob::memory::MemoryBlobStore;
use book_site_core::blob::s3::S3BlobStore;
use book_site_core::blob::BlobStore;
use book_site_core::content::defaults::default_home_content;
use book_site_core::store::memory::MemoryStore;
use book_site_core::store::postgres::PgStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    // `book-site-api hash-password <password>` prints a value for ADMIN_PASSWORD_HASH.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, password] = args.as_slice() {
        if command == "hash-password" {
            let hash = book_site_core::auth::hash_password(password)?;
            println!("{hash}");
            return Ok(());
        }
    }

    let config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting book site API server");

    let blobs: Arc<dyn BlobStore> = match config.s3.clone() {
        Some(settings) => {
            tracing::info!(bucket = %settings.bucket, region = %settings.region, "Using S3 blob store");
            Arc::new(S3BlobStore::connect(settings).await)
        }
        None => {
            tracing::warn!("AWS_BUCKET_NAME not set, uploads are kept in memory");
            Arc::new(MemoryBlobStore::new())
        }
    };

    let state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .min_connections(config.db_min_connections)
                .connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;
            tracing::info!("Connected to PostgreSQL");

            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
            tracing::info!("Database migrations applied");

            AppState::new(Arc::new(PgStore::new(pool)), blobs, config.clone())
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory");
            AppState::new(Arc::new(MemoryStore::new()), blobs, config.clone())
        }
    };

    if config.seed_home_content {
        let seeded = state
            .home_content()
            .seed(&default_home_content())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed home content: {e}"))?;
        if seeded {
            tracing::info!("Seeded default home content");
        }
    }
    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET not set, admin login and every admin route are disabled");
    }
    if config.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH not set, admin login is disabled");
    }

    let app = routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer(&config.cors_origins));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
