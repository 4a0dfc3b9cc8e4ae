//! Connection pooling for database connections.

use std::ops::{Deref, DerefMut};

pub use deadpool::managed::Timeouts;
use patchwork_core::{Connection, Driver, Error, Result};

/// Default maximum size of a pool, which is `cpu_core_count * 2` including
/// logical cores.
fn default_max_size() -> usize {
    deadpool::managed::PoolConfig::default().max_size
}

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Upper bound on open connections. Drivers that report their own limit
    /// lower this further.
    pub max_size: usize,

    pub timeouts: Timeouts,
}

impl PoolConfig {
    pub fn new() -> Self {
        Self {
            max_size: default_max_size(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection pool that manages database connections.
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
}

impl Pool {
    /// Creates a new connection pool from the given driver.
    ///
    /// One connection is opened immediately so a bad URL or unreachable
    /// database fails here rather than on first use.
    pub async fn new(driver: impl Driver, config: PoolConfig) -> Result<Self> {
        let max_size = match driver.max_connections() {
            Some(limit) => limit.min(config.max_size),
            None => config.max_size,
        };

        let inner = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .runtime(deadpool::Runtime::Tokio1)
        .max_size(max_size.max(1))
        .timeouts(config.timeouts)
        .build()
        .map_err(Error::connection_pool)?;

        drop(inner.get().await.map_err(Error::connection_pool)?);

        Ok(Self { inner })
    }

    /// Retrieves a connection from the pool.
    pub async fn get(&self) -> Result<PoolConnection> {
        let connection = self.inner.get().await.map_err(Error::connection_pool)?;
        Ok(PoolConnection { inner: connection })
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.inner.manager().driver
    }

    pub fn max_size(&self) -> usize {
        self.inner.status().max_size
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Self::Type> {
        tracing::debug!(url = %self.driver.url(), "opening connection");
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: deadpool::managed::Object<Manager>,
}

impl PoolConnection {
    /// Takes the connection out of the pool for good. The pool opens a
    /// fresh one in its place when needed.
    pub fn detach(self) -> Box<dyn Connection> {
        deadpool::managed::Object::take(self.inner)
    }
}

impl std::fmt::Debug for PoolConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PoolConnection").field(&*self.inner).finish()
    }
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
