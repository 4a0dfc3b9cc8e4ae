mod value;
pub(crate) use value::Value;

use patchwork_core::{
    async_trait,
    driver::{Operation, Response, Transaction},
    stmt::{self, Row},
    Result,
};
use patchwork_sql::Serializer;
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            patchwork_core::Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(patchwork_core::Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl patchwork_core::Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn patchwork_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    /// Every in-memory connection is a separate database, so the pool must
    /// hand out the same one.
    fn max_connections(&self) -> Option<usize> {
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory()
            .map_err(patchwork_core::Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            RusqliteConnection::open(path).map_err(patchwork_core::Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    fn execute_batch(&self, sql: &str) -> Result<Response> {
        self.connection
            .execute_batch(sql)
            .map_err(patchwork_core::Error::driver_operation_failed)?;
        Ok(Response::count(0))
    }

    fn exec_statement(&mut self, sql: &stmt::Statement) -> Result<Response> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = Serializer::sqlite().serialize(sql, &mut params);

        tracing::debug!(sql = %sql_str, params = params.len(), "sqlite exec");

        let mut stmt = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(patchwork_core::Error::driver_operation_failed)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        if !sql.returns_rows() {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(patchwork_core::Error::driver_operation_failed)?;

            return Ok(Response::count(count as u64));
        }

        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(patchwork_core::Error::driver_operation_failed)?;

        let mut ret = vec![];

        while let Some(row) = rows
            .next()
            .map_err(patchwork_core::Error::driver_operation_failed)?
        {
            let mut items = Vec::with_capacity(width);

            for index in 0..width {
                let value: rusqlite::types::Value = row
                    .get(index)
                    .map_err(patchwork_core::Error::driver_operation_failed)?;
                items.push(Value::from_sql(value).into_inner());
            }

            ret.push(Row::new(columns.clone(), items));
        }

        Ok(Response::values(ret))
    }
}

#[async_trait]
impl patchwork_core::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(stmt) => self.exec_statement(&stmt),
            Operation::RawSql(sql) => self.execute_batch(&sql),
            Operation::Transaction(Transaction::Start) => self.execute_batch("BEGIN"),
            Operation::Transaction(Transaction::Commit) => self.execute_batch("COMMIT"),
            Operation::Transaction(Transaction::Rollback) => self.execute_batch("ROLLBACK"),
            Operation::ClearCache => {
                self.connection.flush_prepared_statement_cache();
                Ok(Response::count(0))
            }
        }
    }
}
