use super::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Table to insert into
    pub table: String,

    /// Physical column names, in statement order
    pub columns: Vec<String>,

    /// One value per column
    pub values: Vec<Value>,
}
