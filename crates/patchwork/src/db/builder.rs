use super::{Connect, Db, Pool, PoolConfig, Shared, Timeouts};
use patchwork_core::{Driver, Result};

use std::sync::Arc;

/// Configures a [`Db`] before it connects.
#[derive(Debug, Default)]
pub struct Builder {
    pool: PoolConfig,
}

impl Builder {
    /// Caps the number of pooled connections.
    pub fn max_connections(&mut self, max: usize) -> &mut Self {
        self.pool.max_size = max;
        self
    }

    /// Wait, create and recycle timeouts for pooled connections.
    pub fn timeouts(&mut self, timeouts: Timeouts) -> &mut Self {
        self.pool.timeouts = timeouts;
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let url = driver.url().into_owned();
        let pool = Pool::new(driver, self.pool.clone()).await?;

        tracing::debug!(%url, max_connections = pool.max_size(), "database pool ready");

        Ok(Db {
            shared: Arc::new(Shared { pool }),
        })
    }
}
