use crate::{Db, Record, Result};

use patchwork_core::{
    stmt::{BinaryOp, Limit, OrderBy, Projection, Row, Select, Value},
    Error,
};

/// Query builder returned by [`Collection::find`](super::Collection::find).
///
/// Predicates are ANDed together. Nothing runs until one of the terminal
/// methods is awaited.
#[derive(Debug, Clone)]
#[must_use = "a query does nothing until `all`, `one` or `rows` is awaited"]
pub struct Find {
    db: Db,
    select: Select,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Find {
    pub(crate) fn new(db: Db, table: &str) -> Find {
        Find {
            db,
            select: Select::all(table),
            limit: None,
            offset: None,
        }
    }

    /// `column = value`
    pub fn and(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.select.filter.push(column, BinaryOp::Eq, value);
        self
    }

    /// `column >= value`
    pub fn and_ge(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.select.filter.push(column, BinaryOp::Ge, value);
        self
    }

    /// Ascending order on `column`.
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.select.order_by = Some(OrderBy::asc(column));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Restricts the returned columns. Defaults to every column.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.select.projection = Projection::Columns(columns.into_iter().map(Into::into).collect());
        self
    }

    /// The statement this query will run.
    pub fn statement(&self) -> Select {
        let mut select = self.select.clone();

        select.limit = match (self.limit, self.offset) {
            (None, None) => None,
            (limit, offset) => Some(Limit {
                // SQL needs a LIMIT before an OFFSET
                limit: limit.unwrap_or(i64::MAX as u64),
                offset,
            }),
        };

        select
    }

    /// Raw rows, in query order.
    pub async fn rows(self) -> Result<Vec<Row>> {
        let select = self.statement();
        self.db.exec(select).await?.into_rows()
    }

    /// Every matching row, loaded as `T`.
    pub async fn all<T: Record>(self) -> Result<Vec<T>> {
        self.rows().await?.into_iter().map(T::load).collect()
    }

    /// The first matching row, loaded as `T`.
    pub async fn one<T: Record>(self) -> Result<T> {
        let table = self.select.table.clone();
        let mut rows = self.limit(1).rows().await?;

        if rows.is_empty() {
            return Err(Error::record_not_found(format!("table={table}")));
        }

        T::load(rows.swap_remove(0))
    }
}

