use patchwork_core::{
    stmt::{Row, Value},
    Result,
};

/// One declared field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Logical name, as used in include/exclude lists and field masks
    pub name: &'static str,

    /// Physical column. `None` if the field is not persisted.
    pub column: Option<&'static str>,
}

impl Field {
    pub const fn persisted(name: &'static str, column: &'static str) -> Field {
        Field {
            name,
            column: Some(column),
        }
    }

    pub const fn skipped(name: &'static str) -> Field {
        Field { name, column: None }
    }

    pub const fn is_persisted(&self) -> bool {
        self.column.is_some()
    }
}

/// A plain struct that maps onto a table row.
///
/// Usually derived with `#[derive(Record)]`; a hand-written impl only has to
/// keep `FIELDS`, `values` and `load` consistent with each other.
pub trait Record: Send + Sync + Sized + 'static {
    /// Every declared field, in declaration order.
    const FIELDS: &'static [Field];

    /// Current value of each persisted field, keyed by logical name. Fails if
    /// a field holds a value its column cannot store.
    fn values(&self) -> Result<Vec<(&'static str, Value)>>;

    /// Builds a record from a row. Fields that are not persisted take their
    /// default value.
    fn load(row: Row) -> Result<Self>;
}
