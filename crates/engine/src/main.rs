//! Omega Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use omega_engine::api;
use omega_engine::app::{App, Repositories};
use omega_engine::infrastructure::config::EngineConfig;
use omega_engine::infrastructure::ports::{Transactioner, UniqueRepositories};
use omega_engine::infrastructure::postgres::{self, PostgresRepositories};
use omega_engine::infrastructure::unit_of_work::UnitOfWork;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is usually run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omega_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Omega Engine");

    // Load configuration
    let config = EngineConfig::from_env()?;
    tracing::debug!(database = ?config.database, "Configuration loaded");

    // Connect to Postgres
    let pool = postgres::connect(&config.database).await?;
    postgres::ensure_schema(&pool).await?;

    let repos = PostgresRepositories::new(pool, config.database.query_timeout);
    let transactioner: Arc<dyn Transactioner<UniqueRepositories>> = repos.transactioner.clone();
    let unit_of_work = UnitOfWork::new(transactioner, config.transaction_timeout);

    // Create application
    let app = Arc::new(App::new(Repositories::from(&repos), Some(unit_of_work)));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    let addr: SocketAddr = config.address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

/// CORS from `CORS_ALLOWED_ORIGINS` (comma separated, or `*`). Unset means any origin.
fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "*".to_string());

    if allowed_origins == "*" {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS had no valid origins; CORS disabled");
        return None;
    }

    Some(cors.allow_origin(origins))
}
