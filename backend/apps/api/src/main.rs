//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use account::{InMemoryAccountStorage, PgAccountStorage};
use auth::{InMemoryUserStorage, PgUserStorage};
use axum::Router;
use course::{InMemoryCourseStorage, PgCourseStorage};
use platform::password::{Argon2Hasher, CredentialHasher};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;
use crate::routes::{Services, cors_layer, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,account=info,course=info,kernel=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        token_ttl_secs = config.auth.token_ttl_secs(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(config.auth.authenticator()?);
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new());

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!(
                max_connections = config.database_max_connections,
                "Connected to database"
            );

            router(Services {
                users: Arc::new(PgUserStorage::new(pool.clone())),
                accounts: Arc::new(PgAccountStorage::new(pool.clone())),
                courses: Arc::new(PgCourseStorage::new(pool)),
                hasher,
                authenticator,
            })
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data is kept in memory only");
            router(Services {
                users: Arc::new(InMemoryUserStorage::new()),
                accounts: Arc::new(InMemoryAccountStorage::new()),
                courses: Arc::new(InMemoryCourseStorage::new()),
                hasher,
                authenticator,
            })
        }
    };

    serve(app, &config).await
}

async fn serve(app: Router, config: &ApiConfig) -> anyhow::Result<()> {
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
