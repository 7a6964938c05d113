//! Unit of Work pattern implementation.
//!
//! Owns the transaction lifecycle of a single use-case call: begin, run the
//! business closure against the open transaction, then commit or roll back
//! exactly once.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use common::{AppError, AppResult, Context};

/// Boxed future returned by a transactional closure.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// `Tx` is the transaction handle passed by reference to repositories.
/// Implementations only provide the three primitives; `transaction` drives
/// them and is not meant to be overridden.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Tx: Send + Sync + 'static;

    /// Acquire a fresh transaction.
    ///
    /// # Errors
    /// `AppError::StoreUnavailable` if none can be acquired.
    async fn begin(&self) -> AppResult<Self::Tx>;

    async fn commit(&self, tx: Self::Tx) -> AppResult<()>;

    async fn rollback(&self, tx: Self::Tx) -> AppResult<()>;

    /// Execute a closure within a transaction.
    ///
    /// The closure runs only once `begin` has succeeded. Its result decides
    /// the outcome: `Ok` commits, `Err` rolls back and is returned unchanged.
    /// A context deadline bounds `begin` and the closure. Once it passes, no
    /// transaction is opened, or the open one is rolled back instead of
    /// committed, and `StoreUnavailable` is returned.
    async fn transaction<F, T>(&self, ctx: &Context, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a Self::Tx) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let tx = match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, self.begin())
                .await
                .unwrap_or_else(|_| Err(deadline_exceeded()))?,
            None => self.begin().await?,
        };
        tracing::debug!("Transaction started");

        let outcome = {
            let work = f(&tx);
            match ctx.deadline() {
                Some(deadline) => tokio::time::timeout_at(deadline, work)
                    .await
                    .unwrap_or_else(|_| Err(deadline_exceeded())),
                None => work.await,
            }
        };

        // Work that finished after the deadline is not published
        let outcome = match outcome {
            Ok(_) if ctx.is_expired() => Err(deadline_exceeded()),
            other => other,
        };

        match outcome {
            Ok(value) => {
                self.commit(tx).await?;
                tracing::debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Rolling back transaction");
                if let Err(rollback_err) = self.rollback(tx).await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

fn deadline_exceeded() -> AppError {
    AppError::store_unavailable("deadline exceeded")
}

/// SeaORM implementation of UnitOfWork.
///
/// Transactions are READ COMMITTED and read-write. A `DatabaseTransaction`
/// dropped without commit (e.g. a cancelled call) is rolled back by SeaORM.
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    type Tx = DatabaseTransaction;

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(|e| AppError::store_unavailable(e.to_string()))
    }

    async fn commit(&self, tx: DatabaseTransaction) -> AppResult<()> {
        tx.commit().await.map_err(AppError::from)
    }

    async fn rollback(&self, tx: DatabaseTransaction) -> AppResult<()> {
        tx.rollback().await.map_err(AppError::from)
    }
}

/// Run a block inside `$uow.transaction`, boxing the future.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, $ctx:expr, |$tx:ident| $body:expr) => {
        $uow.transaction($ctx, move |$tx| Box::pin(async move { $body }))
            .await
    };
}
