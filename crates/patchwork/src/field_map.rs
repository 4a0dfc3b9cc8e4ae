use crate::{Field, Record};

use indexmap::IndexMap;
use patchwork_core::{stmt::Value, Error, Result};

/// Logical field name to physical column, for one record type.
///
/// Built once from [`Record::FIELDS`]; fields that are not persisted are left
/// out of the map.
#[derive(Debug, Clone)]
pub struct FieldMap {
    declared: &'static [Field],
    columns: IndexMap<&'static str, &'static str>,
}

/// Columns and values selected for a single write, in statement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl FieldMap {
    pub fn new(declared: &'static [Field]) -> FieldMap {
        let columns = declared
            .iter()
            .filter_map(|field| Some((field.name, field.column?)))
            .collect();

        FieldMap { declared, columns }
    }

    pub fn of<T: Record>() -> FieldMap {
        FieldMap::new(T::FIELDS)
    }

    /// Physical column for a logical field, if the field is persisted.
    pub fn column(&self, field: &str) -> Option<&'static str> {
        self.columns.get(field).copied()
    }

    pub fn is_declared(&self, field: &str) -> bool {
        self.declared.iter().any(|f| f.name == field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolves exactly `fields`, in the given order.
    ///
    /// Fails on the first name that is not a persisted field of the record.
    pub fn resolve_including<T: Record>(
        &self,
        record: &T,
        fields: &[impl AsRef<str>],
    ) -> Result<Columns> {
        let values: IndexMap<&'static str, Value> = record.values()?.into_iter().collect();
        let mut ret = Columns::default();

        for field in fields {
            let field = field.as_ref();

            let Some(value) = values.get(field).cloned() else {
                let reason = if self.is_declared(field) {
                    "field is not persisted"
                } else {
                    "not a declared field"
                };
                return Err(Error::field_resolution(field, reason));
            };

            let Some(column) = self.column(field) else {
                return Err(Error::field_resolution(field, "field has no column mapping"));
            };

            ret.push(column, value);
        }

        Ok(ret)
    }

    /// Resolves every persisted field except `fields`, in declaration order.
    ///
    /// Names in `fields` that the record does not declare are ignored.
    pub fn resolve_excluding<T: Record>(
        &self,
        record: &T,
        fields: &[impl AsRef<str>],
    ) -> Result<Columns> {
        let mut ret = Columns::default();

        for (field, value) in record.values()? {
            if fields.iter().any(|excluded| excluded.as_ref() == field) {
                continue;
            }

            // Fields without a column mapping are computed, never written
            let Some(column) = self.column(field) else {
                continue;
            };

            ret.push(column, value);
        }

        Ok(ret)
    }
}

impl Columns {
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    /// Appends caller-supplied fixed fields. Names are physical columns and
    /// bypass the field map.
    pub fn extend_extra(&mut self, extra: &[(&str, Value)]) {
        for (column, value) in extra {
            self.push(*column, value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Rejects a write with nothing to write, or with misaligned lists.
    pub(crate) fn check(&self) -> Result<()> {
        if self.columns.is_empty() || self.values.is_empty() {
            return Err(Error::invalid_statement(
                "query with zero columns and values",
            ));
        }

        if self.columns.len() != self.values.len() {
            return Err(Error::invalid_statement(
                "columns and values length mismatch",
            ));
        }

        Ok(())
    }
}
