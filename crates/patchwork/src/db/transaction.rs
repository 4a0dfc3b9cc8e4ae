use super::{Db, Executor, PoolConnection};
use patchwork_core::{
    async_trait,
    driver::{operation, Operation, Response},
    stmt::Statement,
    Result,
};

/// An active database transaction.
///
/// Holds one pooled connection for its whole lifetime; every statement run
/// through it goes to that connection.
///
/// If dropped without calling [`commit`](Self::commit) or
/// [`rollback`](Self::rollback), the transaction is rolled back.
#[derive(Debug)]
pub struct Transaction<'db> {
    db: &'db Db,

    /// `Option` so that `Drop` can move it into a spawned task.
    connection: Option<PoolConnection>,

    /// Whether commit or rollback has been called.
    finished: bool,
}

impl<'db> Transaction<'db> {
    pub(crate) async fn begin(db: &'db Db) -> Result<Transaction<'db>> {
        let mut connection = db.shared.pool.get().await?;

        connection
            .exec(operation::Transaction::Start.into())
            .await?;

        tracing::debug!("transaction started");

        Ok(Transaction {
            db,
            connection: Some(connection),
            finished: false,
        })
    }

    /// The session this transaction was opened on.
    pub fn db(&self) -> &'db Db {
        self.db
    }

    /// Commit the transaction.
    pub async fn commit(mut self) -> Result<()> {
        self.exec_op(operation::Transaction::Commit.into()).await?;
        self.finished = true;
        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Roll back the transaction.
    pub async fn rollback(mut self) -> Result<()> {
        self.exec_op(operation::Transaction::Rollback.into()).await?;
        self.finished = true;
        tracing::debug!("transaction rolled back");
        Ok(())
    }

    async fn exec_op(&mut self, op: Operation) -> Result<Response> {
        let Some(connection) = self.connection.as_mut() else {
            return Err(patchwork_core::err!("transaction connection already released"));
        };
        connection.exec(op).await
    }
}

#[async_trait]
impl Executor for Transaction<'_> {
    async fn exec(&mut self, stmt: Statement) -> Result<Response> {
        self.exec_op(stmt.into()).await
    }

    fn is_transaction(&self) -> bool {
        true
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        if let Some(mut connection) = self.connection.take() {
            let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                // Closing the connection discards the open transaction
                tracing::warn!(
                    "transaction dropped outside a tokio runtime; discarding its connection"
                );
                drop(connection.detach());
                return;
            };

            tracing::debug!("transaction dropped without commit; rolling back");
            runtime.spawn(async move {
                if let Err(err) = connection
                    .exec(operation::Transaction::Rollback.into())
                    .await
                {
                    tracing::warn!(error = %err, "rollback of dropped transaction failed");
                }
            });
        }
    }
}
