//! Postgres database implementations.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::infrastructure::config::DatabaseConfig;
use crate::infrastructure::ports::{RepoError, UniqueRepositories, VariantGroupRepo, VariantRepo};

mod client;
mod dinosaur;
mod named;
mod schema;
mod transaction;
mod unique;
mod unique_variants;
mod variant;
mod variant_group;

pub use client::PgClient;
pub use dinosaur::PgDinosaurRepo;
pub use named::{NamedParams, PositionalQuery, SqlValue};
pub use schema::ensure_schema;
pub use transaction::{FromPgClient, PgTransactioner};
pub use unique::{PgUniqueQueryRepo, PgUniqueRepo};
pub use unique_variants::PgUniqueVariantsRepo;
pub use variant::PgVariantRepo;
pub use variant_group::PgVariantGroupRepo;

impl FromPgClient for UniqueRepositories {
    fn from_client(client: PgClient) -> Self {
        Self {
            dinosaurs: Arc::new(PgDinosaurRepo::new(client.clone())),
            uniques: Arc::new(PgUniqueRepo::new(client.clone())),
            unique_variants: Arc::new(PgUniqueVariantsRepo::new(client.clone())),
            query: Arc::new(PgUniqueQueryRepo::new(client)),
        }
    }
}

/// Every Postgres repository, bound to the pool, plus the transaction capability.
pub struct PostgresRepositories {
    pub unique: UniqueRepositories,
    pub variant: Arc<dyn VariantRepo>,
    pub variant_group: Arc<dyn VariantGroupRepo>,
    pub transactioner: Arc<PgTransactioner<UniqueRepositories>>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        let client = PgClient::new(pool.clone(), query_timeout);
        Self {
            unique: UniqueRepositories::from_client(client.clone()),
            variant: Arc::new(PgVariantRepo::new(client.clone())),
            variant_group: Arc::new(PgVariantGroupRepo::new(client)),
            transactioner: Arc::new(PgTransactioner::new(pool, query_timeout)),
        }
    }
}

/// Open the connection pool and verify it with a ping.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, RepoError> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database_name)
        .options([(
            "statement_timeout",
            client::statement_timeout_setting(config.query_timeout),
        )]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))?;

    tokio::time::timeout(config.connect_timeout, sqlx::query("SELECT 1").execute(&pool))
        .await
        .map_err(|_| RepoError::timeout("ping"))?
        .map_err(|e| RepoError::database("ping", e))?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database_name,
        "Connected to Postgres"
    );
    Ok(pool)
}
