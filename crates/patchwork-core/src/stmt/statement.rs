use super::{Insert, Select, TableExists, Update};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Insert),
    Update(Update),
    Query(Select),
    TableExists(TableExists),
}

impl Statement {
    /// True if executing the statement yields rows rather than an affected-row count.
    pub fn returns_rows(&self) -> bool {
        matches!(self, Statement::Query(_) | Statement::TableExists(_))
    }

    pub fn table(&self) -> &str {
        match self {
            Statement::Insert(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Query(stmt) => &stmt.table,
            Statement::TableExists(stmt) => &stmt.table,
        }
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Query(value)
    }
}

impl From<TableExists> for Statement {
    fn from(value: TableExists) -> Self {
        Statement::TableExists(value)
    }
}
