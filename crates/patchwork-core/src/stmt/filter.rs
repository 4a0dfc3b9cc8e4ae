use super::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ge,
}

/// `column <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub column: String,
    pub op: BinaryOp,
    pub value: Value,
}

/// A conjunction of column predicates. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub exprs: Vec<ExprBinaryOp>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut filter = Filter::new();
        filter.push(column, BinaryOp::Eq, value);
        filter
    }

    pub fn push(&mut self, column: impl Into<String>, op: BinaryOp, value: impl Into<Value>) {
        self.exprs.push(ExprBinaryOp {
            column: column.into(),
            op,
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
