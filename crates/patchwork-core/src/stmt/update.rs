use super::{Assignments, Filter};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: Assignments,
    pub filter: Filter,
}
