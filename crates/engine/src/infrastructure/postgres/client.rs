//! Generic data-access client.
//!
//! [`PgClient`] runs named-parameter statements against either the pool or one open
//! transaction, so the same repository code serves both. Every statement is bounded
//! by the configured query timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

use super::named::{NamedParams, PositionalQuery, SqlValue};
use crate::infrastructure::ports::RepoError;

/// One open transaction shared by every repository of a session.
///
/// `None` once the session has been committed or rolled back.
pub(crate) type SharedTransaction = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

#[derive(Clone)]
enum Executor {
    Pool(PgPool),
    Transaction(SharedTransaction),
}

#[derive(Clone)]
pub struct PgClient {
    executor: Executor,
    query_timeout: Duration,
}

macro_rules! bind_all {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::BigInt(v) => query.bind(v),
                SqlValue::Real(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
            };
        }
        query
    }};
}

/// Evaluate `$body` with `$conn` bound to the client's executor.
macro_rules! on_executor {
    ($client:expr, $operation:expr, |$conn:ident| $body:expr) => {
        match &$client.executor {
            Executor::Pool(pool) => {
                let $conn = pool;
                $body
            }
            Executor::Transaction(shared) => {
                let mut guard = shared.lock().await;
                let Some(tx) = guard.as_mut() else {
                    return Err(RepoError::database(
                        $operation,
                        "transaction already finished",
                    ));
                };
                let $conn = &mut **tx;
                $body
            }
        }
    };
}

impl PgClient {
    /// Client that checks a connection out of the pool per statement.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            executor: Executor::Pool(pool),
            query_timeout,
        }
    }

    pub(crate) fn in_transaction(shared: SharedTransaction, query_timeout: Duration) -> Self {
        Self {
            executor: Executor::Transaction(shared),
            query_timeout,
        }
    }

    pub fn is_transactional(&self) -> bool {
        matches!(self.executor, Executor::Transaction(_))
    }

    /// Fetch exactly one row.
    ///
    /// # Errors
    ///
    /// `RepoError::NotFound` (tagged with `entity_type` and the parameters) when the
    /// query matches nothing.
    pub async fn get_one<T>(
        &self,
        entity_type: &'static str,
        query: &str,
        params: NamedParams,
    ) -> Result<T, RepoError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        const OPERATION: &str = "get_one";
        let (sql, values) = PositionalQuery::parse(query, &params)?.into_parts();

        let row = self
            .timed(OPERATION, async move {
                let query = bind_all!(sqlx::query_as::<_, T>(&sql), values);
                on_executor!(self, OPERATION, |conn| query.fetch_optional(conn).await)
                    .map_err(|e| map_sqlx_error(OPERATION, e))
            })
            .await?;

        row.ok_or_else(|| RepoError::not_found(entity_type, &params))
    }

    /// Fetch every matching row. No match is an empty vector, not an error.
    pub async fn select_many<T>(&self, query: &str, params: NamedParams) -> Result<Vec<T>, RepoError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        const OPERATION: &str = "select_many";
        let (sql, values) = PositionalQuery::parse(query, &params)?.into_parts();

        self.timed(OPERATION, async move {
            let query = bind_all!(sqlx::query_as::<_, T>(&sql), values);
            on_executor!(self, OPERATION, |conn| query.fetch_all(conn).await)
                .map_err(|e| map_sqlx_error(OPERATION, e))
        })
        .await
    }

    /// Run an insert or update.
    ///
    /// Returns the generated id when the statement has a `RETURNING id` clause and
    /// produced a row, `None` otherwise.
    pub async fn store(&self, query: &str, params: NamedParams) -> Result<Option<i32>, RepoError> {
        const OPERATION: &str = "store";
        let (sql, values) = PositionalQuery::parse(query, &params)?.into_parts();

        self.timed(OPERATION, async move {
            let query = bind_all!(sqlx::query_scalar::<_, i32>(&sql), values);
            on_executor!(self, OPERATION, |conn| query.fetch_optional(conn).await)
                .map_err(|e| map_sqlx_error(OPERATION, e))
        })
        .await
    }

    /// Run a statement and return the number of affected rows.
    pub async fn execute(&self, query: &str, params: NamedParams) -> Result<u64, RepoError> {
        const OPERATION: &str = "execute";
        let (sql, values) = PositionalQuery::parse(query, &params)?.into_parts();

        self.timed(OPERATION, async move {
            let query = bind_all!(sqlx::query(&sql), values);
            on_executor!(self, OPERATION, |conn| query.execute(conn).await)
                .map(|done| done.rows_affected())
                .map_err(|e| map_sqlx_error(OPERATION, e))
        })
        .await
    }

    /// Run a delete. Deleting nothing is not an error.
    pub async fn delete(&self, query: &str, params: NamedParams) -> Result<(), RepoError> {
        let affected = self.execute(query, params).await?;
        tracing::debug!(rows = affected, "Delete executed");
        Ok(())
    }

    async fn timed<T, Fut>(&self, operation: &'static str, work: Fut) -> Result<T, RepoError>
    where
        Fut: Future<Output = Result<T, RepoError>>,
    {
        match tokio::time::timeout(self.query_timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "Query timed out"
                );
                Err(RepoError::timeout(operation))
            }
        }
    }
}

/// Server-side `statement_timeout` value matching a client-side query timeout.
///
/// The server cancels a statement that outlives it, so an abandoned statement
/// does not keep its connection busy.
pub(crate) fn statement_timeout_setting(timeout: Duration) -> String {
    format!("{}ms", timeout.as_millis().max(1))
}

/// Classify a driver error.
pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_foreign_key_violation()
                || db.is_check_violation() =>
        {
            RepoError::constraint(db.message())
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => RepoError::serialization(&err),
        _ => RepoError::database(operation, &err),
    }
}
