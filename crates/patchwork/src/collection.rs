mod cache;
pub use cache::{CollectionCache, EnsureCollection};

mod find;
pub use find::Find;

use crate::{Db, Result};

use patchwork_core::stmt::TableExists;

use std::sync::Arc;

/// A handle to one physical table.
///
/// Obtaining a handle never touches the database; use [`exists`](Self::exists)
/// or go through a [`CollectionCache`] to verify it.
#[derive(Debug, Clone)]
pub struct Collection {
    db: Db,
    name: Arc<str>,
}

impl Collection {
    pub(crate) fn new(db: Db, name: &str) -> Collection {
        Collection {
            db,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Looks the table up in the database catalog.
    pub async fn exists(&self) -> Result<bool> {
        let rows = self
            .db
            .exec(TableExists {
                table: self.name.to_string(),
            })
            .await?
            .into_rows()?;

        Ok(!rows.is_empty())
    }

    /// Starts a query against this table.
    pub fn find(&self) -> Find {
        Find::new(self.db.clone(), &self.name)
    }
}
