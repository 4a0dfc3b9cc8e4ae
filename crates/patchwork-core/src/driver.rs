pub mod operation;
pub use operation::{Operation, Transaction};

mod response;
pub use response::{Response, Rows};

use crate::{async_trait, Result};

use std::{borrow::Cow, fmt::Debug};

/// Creates connections to one database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// The URL this driver connects to.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on open connections, if the backend imposes one.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// A single open connection.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}

#[async_trait]
impl<T: Driver + ?Sized> Driver for Box<T> {
    fn url(&self) -> Cow<'_, str> {
        (**self).url()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        (**self).connect().await
    }

    fn max_connections(&self) -> Option<usize> {
        (**self).max_connections()
    }
}
