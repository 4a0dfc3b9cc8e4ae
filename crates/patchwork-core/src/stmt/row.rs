use super::Value;
use crate::{Error, Result};

use std::sync::Arc;

/// A row returned by a query. Column names are shared by every row of a
/// result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        assert_eq!(columns.len(), values.len(), "row width mismatch");
        Row { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.position(column).map(|index| &self.values[index])
    }

    /// Moves the value of `column` out of the row, leaving `Null` behind.
    pub fn take(&mut self, column: &str) -> Result<Value> {
        let Some(index) = self.position(column) else {
            return Err(Error::invalid_result(format!(
                "row has no column `{column}`; columns={:?}",
                self.columns
            )));
        };
        Ok(std::mem::take(&mut self.values[index]))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
