//! Transaction capability ports.
//!
//! A [`Transactioner`] opens a [`TxSession`]; the session hands out a set of
//! repositories bound to it and is finished exactly once, by commit, rollback or abort.

use async_trait::async_trait;

use super::error::RepoError;

#[async_trait]
pub trait TxSession<R>: Send {
    /// Repositories whose every statement runs inside this session.
    fn repositories(&self) -> R;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepoError>;

    /// Roll back a session whose work was abandoned mid-statement (timeout or panic).
    ///
    /// Implementations stop any statement still running for the session before
    /// rolling back, and must return within a bounded time.
    async fn abort(self: Box<Self>) -> Result<(), RepoError> {
        self.rollback().await
    }
}

#[async_trait]
pub trait Transactioner<R>: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn TxSession<R>>, RepoError>;
}
