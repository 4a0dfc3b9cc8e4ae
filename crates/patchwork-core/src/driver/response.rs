use crate::{stmt::Row, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows produced by a query
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self.rows {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => Err(Error::invalid_result("expected Count, got Values")),
        }
    }

    pub fn into_rows(self) -> Result<Vec<Row>> {
        match self.rows {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(_) => Err(Error::invalid_result("expected Values, got Count")),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }
}
