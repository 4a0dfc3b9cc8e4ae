use super::{Filter, OrderBy, Projection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: u64,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub projection: Projection,
    pub filter: Filter,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
}

impl Select {
    /// `SELECT * FROM table`
    pub fn all(table: impl Into<String>) -> Self {
        Select {
            table: table.into(),
            projection: Projection::All,
            filter: Filter::new(),
            order_by: None,
            limit: None,
        }
    }
}
