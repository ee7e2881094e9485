//! Postgres transaction capability.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

use super::client::{map_sqlx_error, statement_timeout_setting, PgClient, SharedTransaction};
use crate::infrastructure::ports::{RepoError, Transactioner, TxSession};

/// A repository set that can be built on top of a [`PgClient`].
pub trait FromPgClient {
    fn from_client(client: PgClient) -> Self;
}

/// Opens Postgres transactions and hands out repositories of type `R` bound to them.
pub struct PgTransactioner<R> {
    pool: PgPool,
    query_timeout: Duration,
    _repositories: PhantomData<fn() -> R>,
}

impl<R> PgTransactioner<R> {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
            _repositories: PhantomData,
        }
    }
}

/// Upper bound for cancelling and rolling back an abandoned transaction.
const ABORT_TIMEOUT: Duration = Duration::from_secs(5);

/// Records the backend serving the transaction and bounds each of its statements on
/// the server.
const SETUP: &str = "SELECT pg_backend_pid(), set_config('statement_timeout', $1, true)";

#[async_trait]
impl<R> Transactioner<R> for PgTransactioner<R>
where
    R: FromPgClient + Send + 'static,
{
    async fn begin(&self) -> Result<Box<dyn TxSession<R>>, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;

        let (backend_pid, _): (i32, String) = sqlx::query_as(SETUP)
            .bind(statement_timeout_setting(self.query_timeout))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;
        tracing::debug!(backend_pid, "Transaction started");

        let shared: SharedTransaction = Arc::new(Mutex::new(Some(tx)));
        Ok(Box::new(PgTxSession {
            client: PgClient::in_transaction(Arc::clone(&shared), self.query_timeout),
            shared,
            pool: self.pool.clone(),
            backend_pid,
            finish_timeout: self.query_timeout.min(ABORT_TIMEOUT),
            _repositories: PhantomData,
        }))
    }
}

struct PgTxSession<R> {
    client: PgClient,
    shared: SharedTransaction,
    pool: PgPool,
    backend_pid: i32,
    finish_timeout: Duration,
    _repositories: PhantomData<fn() -> R>,
}

impl<R> PgTxSession<R> {
    async fn finish(
        &self,
        operation: &'static str,
    ) -> Result<Transaction<'static, Postgres>, RepoError> {
        self.shared
            .lock()
            .await
            .take()
            .ok_or_else(|| RepoError::database(operation, "transaction already finished"))
    }

    /// Roll back, giving up after `finish_timeout`.
    ///
    /// On expiry the transaction is dropped; sqlx queues the rollback on the
    /// connection and the pool discards it if it does not become usable again.
    async fn rollback_within(&self, operation: &'static str) -> Result<(), RepoError> {
        let rollback = async {
            let tx = self.finish(operation).await?;
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error(operation, e))
        };

        match tokio::time::timeout(self.finish_timeout, rollback).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    backend_pid = self.backend_pid,
                    timeout_ms = self.finish_timeout.as_millis() as u64,
                    "Rollback did not finish in time, dropping the connection"
                );
                Err(RepoError::timeout(operation))
            }
        }
    }

    /// Ask the server to stop whatever statement this transaction's backend is running.
    async fn cancel_backend(&self) {
        let cancel = sqlx::query_scalar::<_, bool>("SELECT pg_cancel_backend($1)")
            .bind(self.backend_pid)
            .fetch_one(&self.pool);

        match tokio::time::timeout(self.finish_timeout, cancel).await {
            Ok(Ok(signalled)) => {
                tracing::debug!(backend_pid = self.backend_pid, signalled, "Backend cancel sent");
            }
            Ok(Err(e)) => {
                tracing::warn!(backend_pid = self.backend_pid, error = %e, "Backend cancel failed");
            }
            Err(_) => {
                tracing::warn!(backend_pid = self.backend_pid, "Backend cancel timed out");
            }
        }
    }
}

#[async_trait]
impl<R> TxSession<R> for PgTxSession<R>
where
    R: FromPgClient + Send + 'static,
{
    fn repositories(&self) -> R {
        R::from_client(self.client.clone())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let tx = self.finish("commit").await?;
        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;
        tracing::debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        self.rollback_within("rollback").await?;
        tracing::debug!("Transaction rolled back");
        Ok(())
    }

    async fn abort(self: Box<Self>) -> Result<(), RepoError> {
        self.cancel_backend().await;
        self.rollback_within("abort").await?;
        tracing::debug!(backend_pid = self.backend_pid, "Transaction aborted");
        Ok(())
    }
}
