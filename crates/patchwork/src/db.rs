mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

mod pool;
pub use pool::{Pool, PoolConfig, PoolConnection, Timeouts};

mod transaction;
pub use transaction::Transaction;

use crate::{Collection, Result};

use patchwork_core::{
    async_trait,
    driver::{Operation, Response},
    stmt::Statement,
    Driver,
};

use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) pool: Pool,
}

/// A database session. Cloning is cheap and every clone shares one pool.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

/// Something statements can be run against: the pooled session itself or an
/// open transaction.
#[async_trait]
pub trait Executor: Send {
    /// Execute a statement
    async fn exec(&mut self, stmt: Statement) -> Result<Response>;

    /// Whether writes are only visible once an enclosing transaction commits.
    fn is_transaction(&self) -> bool;
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects with default pool settings.
    pub async fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url).await
    }

    /// Execute a statement on a connection from the pool.
    pub async fn exec(&self, stmt: impl Into<Statement>) -> Result<Response> {
        self.exec_op(Operation::QuerySql(stmt.into())).await
    }

    /// Runs parameterless SQL verbatim, such as fixture DDL.
    pub async fn exec_raw(&self, sql: impl Into<String>) -> Result<()> {
        self.exec_op(Operation::RawSql(sql.into())).await?;
        Ok(())
    }

    async fn exec_op(&self, op: Operation) -> Result<Response> {
        let mut connection = self.shared.pool.get().await?;
        connection.exec(op).await
    }

    /// A handle to the table `name`. Does not touch the database.
    pub fn collection(&self, name: &str) -> Collection {
        Collection::new(self.clone(), name)
    }

    /// Starts a transaction on a dedicated connection.
    pub async fn transaction(&self) -> Result<Transaction<'_>> {
        Transaction::begin(self).await
    }

    /// Drops cached prepared statements on the next pooled connection.
    pub async fn clear_statement_cache(&self) -> Result<()> {
        self.exec_op(Operation::ClearCache).await?;
        Ok(())
    }

    pub fn driver(&self) -> &dyn Driver {
        self.shared.pool.driver()
    }
}

#[async_trait]
impl Executor for Db {
    async fn exec(&mut self, stmt: Statement) -> Result<Response> {
        Db::exec(self, stmt).await
    }

    fn is_transaction(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("url", &self.driver().url())
            .finish()
    }
}
