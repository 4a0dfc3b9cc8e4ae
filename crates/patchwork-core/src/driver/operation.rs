use crate::stmt::Statement;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Serialize and run a statement
    QuerySql(Statement),

    /// Run parameterless SQL verbatim
    RawSql(String),

    /// Transaction control
    Transaction(Transaction),

    /// Drop any prepared statements the connection is holding on to
    ClearCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

impl Operation {
    pub fn is_query_sql(&self) -> bool {
        matches!(self, Operation::QuerySql(_))
    }

    pub fn as_query_sql(&self) -> Option<&Statement> {
        match self {
            Operation::QuerySql(stmt) => Some(stmt),
            _ => None,
        }
    }
}

impl From<Statement> for Operation {
    fn from(value: Statement) -> Self {
        Operation::QuerySql(value)
    }
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Operation::Transaction(value)
    }
}
