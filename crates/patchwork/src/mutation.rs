mod insert;
mod list;
mod update;

mod options;
pub use options::{Builder, MutationOptions};

use crate::{Columns, Db, EnsureCollection, Error, FieldMap, Record, Result};

use patchwork_core::stmt::{Assignments, Value};

use std::marker::PhantomData;

/// Inserts and updates a policy-selected subset of a record's fields, and
/// lists records page by page.
///
/// Built once with [`PartialMutation::builder`] and reused for any number of
/// calls. Cloning is cheap.
pub struct PartialMutation<T> {
    table: String,
    db: Db,
    collection: EnsureCollection,
    fields: FieldMap,
    include: Vec<String>,
    exclude: Vec<String>,
    include_update: Option<Vec<String>>,
    exclude_update: Option<Vec<String>>,
    _record: PhantomData<fn() -> T>,
}

/// Which logical fields a single write resolves, and how.
#[derive(Debug, Clone, PartialEq)]
enum Selection {
    Including(Vec<String>),
    Excluding(Vec<String>),
}

impl<T: Record> PartialMutation<T> {
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    /// Columns and values an insert of `record` would write, extra fields
    /// last.
    pub fn resolve_insert(&self, record: &T, extra: &[(&str, Value)]) -> Result<Columns> {
        let mut columns = self.resolve(record, &self.insert_selection())?;
        columns.extend_extra(extra);
        columns.check()?;
        Ok(columns)
    }

    /// The `SET` clause an update of `record` would use. An extra field that
    /// names an already selected column replaces its value.
    pub fn resolve_update(
        &self,
        record: &T,
        field_mask: &[impl AsRef<str>],
        extra: &[(&str, Value)],
    ) -> Result<Assignments> {
        let mut columns = self.resolve(record, &self.update_selection(field_mask))?;
        columns.extend_extra(extra);
        columns.check()?;

        Ok(columns.columns.into_iter().zip(columns.values).collect())
    }

    fn resolve(&self, record: &T, selection: &Selection) -> Result<Columns> {
        match selection {
            Selection::Including(fields) => {
                self.fields.resolve_including(record, fields.as_slice())
            }
            Selection::Excluding(fields) => {
                self.fields.resolve_excluding(record, fields.as_slice())
            }
        }
    }

    fn insert_selection(&self) -> Selection {
        if !self.include.is_empty() {
            Selection::Including(self.include.clone())
        } else {
            Selection::Excluding(self.exclude.clone())
        }
    }

    /// Update overrides replace the generic lists whenever they are set, even
    /// to an empty list.
    fn update_selection(&self, field_mask: &[impl AsRef<str>]) -> Selection {
        let include = self.include_update.as_deref().unwrap_or(&self.include);
        let exclude = self.exclude_update.as_deref().unwrap_or(&self.exclude);

        Selection::narrow(include, exclude, field_mask)
    }

    /// Re-reads the written row through the cached table handle.
    ///
    /// A miss here means the write went through but the lookup key does not
    /// match it, which is reported as an invalid result rather than
    /// record-not-found.
    async fn read_back(&self, where_column: &str, where_value: Value) -> Result<T> {
        let collection = self.collection.get().await?;
        let res = collection
            .find()
            .and(where_column, where_value.clone())
            .one::<T>()
            .await;

        match res {
            Err(err) if err.is_record_not_found() => Err(Error::invalid_result(format!(
                "written row not found on read-back; table={}, {where_column}={where_value}",
                self.table
            ))),
            res => res,
        }
    }
}

impl Selection {
    /// Applies a caller field mask to an include/exclude policy. Including
    /// keeps mask order; excluding turns the mask minus the excluded fields
    /// into an include list. An empty mask leaves the policy as is.
    fn narrow(
        include: &[String],
        exclude: &[String],
        field_mask: &[impl AsRef<str>],
    ) -> Selection {
        let mask = field_mask.iter().map(|field| field.as_ref());

        if !include.is_empty() {
            if field_mask.is_empty() {
                return Selection::Including(include.to_vec());
            }

            return Selection::Including(
                mask.filter(|field| include.iter().any(|f| f == field))
                    .map(String::from)
                    .collect(),
            );
        }

        if field_mask.is_empty() {
            return Selection::Excluding(exclude.to_vec());
        }

        Selection::Including(
            mask.filter(|field| !exclude.iter().any(|f| f == field))
                .map(String::from)
                .collect(),
        )
    }
}

impl<T> Clone for PartialMutation<T> {
    fn clone(&self) -> Self {
        PartialMutation {
            table: self.table.clone(),
            db: self.db.clone(),
            collection: self.collection.clone(),
            fields: self.fields.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            include_update: self.include_update.clone(),
            exclude_update: self.exclude_update.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for PartialMutation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialMutation")
            .field("record", &std::any::type_name::<T>())
            .field("table", &self.table)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("include_update", &self.include_update)
            .field("exclude_update", &self.exclude_update)
            .finish()
    }
}
