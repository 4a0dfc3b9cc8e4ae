use super::Collection;
use crate::{Db, Error, Result};

use dashmap::DashMap;
use tokio::sync::OnceCell;

use std::sync::Arc;

/// Memoizes verified [`Collection`] handles by table name.
///
/// Clones share the same entries. Concurrent lookups of one name wait on a
/// single existence check. Entries live until [`clear`](Self::clear).
#[derive(Debug, Clone, Default)]
pub struct CollectionCache {
    entries: Arc<DashMap<String, Arc<OnceCell<Collection>>>>,
}

/// A lazily resolved handle for one table, bound to a session and a cache.
#[derive(Debug, Clone)]
pub struct EnsureCollection {
    cache: CollectionCache,
    db: Db,
    name: Arc<str>,
}

enum Lookup {
    Missing(Collection),
    Failed(Error),
}

impl CollectionCache {
    pub fn new() -> CollectionCache {
        CollectionCache::default()
    }

    /// Binds a table name to this cache without doing any lookup yet.
    pub fn ensure(&self, db: &Db, name: &str) -> EnsureCollection {
        EnsureCollection {
            cache: self.clone(),
            db: db.clone(),
            name: name.into(),
        }
    }

    /// Returns the cached handle for `name`, checking existence on a miss.
    ///
    /// When the table does not exist, every entry is dropped, the session's
    /// statement cache is flushed, and the unverified handle is returned
    /// anyway. Nothing is cached for it.
    pub async fn ensure_collection(&self, db: &Db, name: &str) -> Result<Collection> {
        let cell = Arc::clone(&self.entries.entry(name.to_string()).or_default());

        if let Some(collection) = cell.get() {
            tracing::trace!(table = name, "collection cache hit");
            return Ok(collection.clone());
        }

        let res = cell
            .get_or_try_init(|| async {
                tracing::debug!(table = name, "checking collection exists");

                let collection = db.collection(name);
                match collection.exists().await {
                    Ok(true) => Ok(collection),
                    Ok(false) => Err(Lookup::Missing(collection)),
                    Err(err) => Err(Lookup::Failed(err)),
                }
            })
            .await;

        match res {
            Ok(collection) => Ok(collection.clone()),
            Err(Lookup::Failed(err)) => Err(err),
            Err(Lookup::Missing(collection)) => {
                tracing::warn!(
                    table = name,
                    "collection does not exist; clearing collection cache"
                );

                self.clear();

                if let Err(err) = db.clear_statement_cache().await {
                    tracing::warn!(error = %err, "failed to clear statement cache");
                }

                Ok(collection)
            }
        }
    }

    /// Drops every entry. The next lookup of any name checks existence again.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of verified handles currently cached.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnsureCollection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the handle through the cache.
    pub async fn get(&self) -> Result<Collection> {
        self.cache.ensure_collection(&self.db, &self.name).await
    }
}
