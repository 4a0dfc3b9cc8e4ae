/// Asks the catalog whether a table exists. Returns one row if it does and
/// no rows otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExists {
    pub table: String,
}
