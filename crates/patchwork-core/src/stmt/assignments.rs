use super::Value;

use indexmap::IndexMap;

/// The `SET` clause of an update: physical column name to new value.
///
/// Assigning the same column twice keeps the first position and the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    columns: IndexMap<String, Value>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Assignments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut assignments = Assignments::new();
        for (column, value) in iter {
            assignments.set(column, value);
        }
        assignments
    }
}
