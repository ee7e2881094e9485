//! Transactional execution of a unit of work.
//!
//! [`UnitOfWork`] wraps a [`Transactioner`] and runs one async closure inside a
//! session: commit when it returns `Ok`, rollback when it returns `Err`, abort when it
//! panics or runs past the timeout. [`run_in_transaction`] and
//! [`run_in_transaction_unit`] add the fallback for callers that have no transaction
//! capability configured.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::time::Instant;

use crate::infrastructure::ports::{TransactionError, Transactioner, TxSession};

/// Upper bound for one unit of work when nothing else is configured.
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs closures transactionally against repositories of type `R`.
pub struct UnitOfWork<R> {
    transactioner: Arc<dyn Transactioner<R>>,
    timeout: Duration,
}

impl<R> Clone for UnitOfWork<R> {
    fn clone(&self) -> Self {
        Self {
            transactioner: Arc::clone(&self.transactioner),
            timeout: self.timeout,
        }
    }
}

impl<R: Send + 'static> UnitOfWork<R> {
    pub fn new(transactioner: Arc<dyn Transactioner<R>>, timeout: Duration) -> Self {
        Self {
            transactioner,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `work` in a fresh transaction and return its value.
    ///
    /// The timeout covers both `work` and the commit. Errors returned by `work` are
    /// passed through unchanged after rollback. Failures of the machinery itself
    /// (begin, commit, panic, timeout) are converted with `E::from(TransactionError)`.
    pub async fn run<T, E, F, Fut>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(R) -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: From<TransactionError> + Send,
    {
        let session = self
            .transactioner
            .begin()
            .await
            .map_err(|e| E::from(TransactionError::Begin(e)))?;
        let deadline = Instant::now() + self.timeout;
        let repositories = session.repositories();

        // The closure is invoked inside the guarded future so a synchronous panic in
        // its body is caught the same way as one raised while polling.
        let guarded = AssertUnwindSafe(async move { work(repositories).await }).catch_unwind();

        match tokio::time::timeout_at(deadline, guarded).await {
            Ok(Ok(Ok(value))) => match tokio::time::timeout_at(deadline, session.commit()).await {
                Ok(Ok(())) => Ok(value),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Transaction commit failed");
                    Err(E::from(TransactionError::Commit(e)))
                }
                Err(_elapsed) => {
                    tracing::error!(
                        timeout_ms = self.timeout.as_millis() as u64,
                        "Transaction commit timed out, outcome unknown"
                    );
                    Err(E::from(TransactionError::TimedOut(self.timeout)))
                }
            },
            Ok(Ok(Err(err))) => {
                rollback(session, "unit of work returned an error").await;
                Err(err)
            }
            Ok(Err(payload)) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(panic = %message, "Unit of work panicked, rolling back");
                abort(session, "unit of work panicked").await;
                Err(E::from(TransactionError::Panicked(message)))
            }
            Err(_elapsed) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Unit of work timed out, aborting"
                );
                abort(session, "unit of work timed out").await;
                Err(E::from(TransactionError::TimedOut(self.timeout)))
            }
        }
    }

    /// Same as [`UnitOfWork::run`] for work that produces no value.
    pub async fn run_unit<E, F, Fut>(&self, work: F) -> Result<(), E>
    where
        F: FnOnce(R) -> Fut + Send,
        Fut: Future<Output = Result<(), E>> + Send,
        E: From<TransactionError> + Send,
    {
        self.run(work).await
    }
}

/// Run `work` transactionally when a unit of work is available, otherwise directly
/// against `direct` with no atomicity.
pub async fn run_in_transaction<R, T, E, F, Fut>(
    unit_of_work: Option<&UnitOfWork<R>>,
    direct: &R,
    work: F,
) -> Result<T, E>
where
    R: Clone + Send + 'static,
    F: FnOnce(R) -> Fut + Send,
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: From<TransactionError> + Send,
{
    match unit_of_work {
        Some(unit_of_work) => unit_of_work.run(work).await,
        None => work(direct.clone()).await,
    }
}

/// Value-less flavour of [`run_in_transaction`].
pub async fn run_in_transaction_unit<R, E, F, Fut>(
    unit_of_work: Option<&UnitOfWork<R>>,
    direct: &R,
    work: F,
) -> Result<(), E>
where
    R: Clone + Send + 'static,
    F: FnOnce(R) -> Fut + Send,
    Fut: Future<Output = Result<(), E>> + Send,
    E: From<TransactionError> + Send,
{
    match unit_of_work {
        Some(unit_of_work) => unit_of_work.run_unit(work).await,
        None => work(direct.clone()).await,
    }
}

async fn rollback<R>(session: Box<dyn TxSession<R>>, reason: &'static str) {
    if let Err(e) = session.rollback().await {
        tracing::error!(error = %e, reason, "Transaction rollback failed");
    }
}

async fn abort<R>(session: Box<dyn TxSession<R>>, reason: &'static str) {
    if let Err(e) = session.abort().await {
        tracing::error!(error = %e, reason, "Transaction abort failed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
