use super::PartialMutation;
use crate::{CollectionCache, Db, Error, FieldMap, Record, Result};

use std::marker::PhantomData;

/// Every setting a [`PartialMutation`] recognizes.
///
/// `None` means "not configured". Options can be assembled ahead of time and
/// applied to a builder with [`Builder::options`].
#[derive(Debug, Clone, Default)]
pub struct MutationOptions {
    /// Table the operation writes to and reads from
    pub table: Option<String>,

    /// Session used for read-back and listing
    pub db: Option<Db>,

    /// Cache the table handle is resolved through
    pub collections: Option<CollectionCache>,

    /// Logical fields to write. Takes priority over `exclude`.
    pub include: Option<Vec<String>>,

    /// Logical fields never to write
    pub exclude: Option<Vec<String>>,

    /// Replaces `include` for updates. An empty list still counts as set.
    pub include_update: Option<Vec<String>>,

    /// Replaces `exclude` for updates. An empty list still counts as set.
    pub exclude_update: Option<Vec<String>>,
}

impl MutationOptions {
    /// Applies `other` on top of `self`. Every setting configured in `other`
    /// wins.
    pub fn merge(&mut self, other: MutationOptions) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        take!(
            table,
            db,
            collections,
            include,
            exclude,
            include_update,
            exclude_update
        );
    }
}

/// Builds and validates a [`PartialMutation`].
#[must_use]
pub struct Builder<T> {
    options: MutationOptions,
    _record: PhantomData<fn() -> T>,
}

fn to_strings<I>(fields: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}

impl<T: Record> Builder<T> {
    pub(super) fn new() -> Builder<T> {
        Builder {
            options: MutationOptions::default(),
            _record: PhantomData,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.options.table = Some(table.into());
        self
    }

    pub fn db(mut self, db: &Db) -> Self {
        self.options.db = Some(db.clone());
        self
    }

    pub fn collections(mut self, collections: &CollectionCache) -> Self {
        self.options.collections = Some(collections.clone());
        self
    }

    pub fn include<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.options.include = Some(to_strings(fields));
        self
    }

    pub fn exclude<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.options.exclude = Some(to_strings(fields));
        self
    }

    pub fn include_update<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.options.include_update = Some(to_strings(fields));
        self
    }

    pub fn exclude_update<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.options.exclude_update = Some(to_strings(fields));
        self
    }

    /// Applies a preset. Settings it configures override earlier ones, and
    /// later builder calls override it in turn.
    pub fn options(mut self, options: MutationOptions) -> Self {
        self.options.merge(options);
        self
    }

    /// Validates the configuration and binds the table handle.
    ///
    /// The handle is resolved lazily, on the first read that needs it.
    pub fn build(self) -> Result<PartialMutation<T>> {
        let MutationOptions {
            table,
            db,
            collections,
            include,
            exclude,
            include_update,
            exclude_update,
        } = self.options;

        let table = match table {
            Some(table) if !table.is_empty() => table,
            _ => return Err(Error::invalid_options("table is required")),
        };

        let Some(db) = db else {
            return Err(Error::invalid_options("db is required"));
        };

        let Some(collections) = collections else {
            return Err(Error::invalid_options("collections is required"));
        };

        let include = include.unwrap_or_default();
        let exclude = exclude.unwrap_or_default();

        if include.is_empty() && exclude.is_empty() {
            return Err(Error::invalid_options(
                "PartialMutation, included or excluded fields are required",
            ));
        }

        let collection = collections.ensure(&db, &table);

        Ok(PartialMutation {
            fields: FieldMap::of::<T>(),
            table,
            db,
            collection,
            include,
            exclude,
            include_update,
            exclude_update,
            _record: PhantomData,
        })
    }
}
