use patchwork::CollectionCache;
use patchwork_core::driver::Operation;
use pretty_assertions::assert_eq;
use tests::{tests, DbTest};

async fn concurrent_lookups_share_one_existence_check(test: &mut DbTest) {
    let db = test.setup_db().await;
    let cache = test.collections().clone();

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let cache = cache.clone();
            let db = db.clone();
            tokio::spawn(async move { cache.ensure_collection(&db, "resources").await })
        })
        .collect();

    for task in tasks {
        let collection = task.await.unwrap().unwrap();
        assert_eq!(collection.name(), "resources");
    }

    assert_eq!(test.existence_checks(), 1);
    assert_eq!(cache.len(), 1);
}

async fn hit_skips_existence_check(test: &mut DbTest) {
    let db = test.setup_db().await;
    let cache = test.collections();

    cache.ensure_collection(&db, "resources").await.unwrap();
    cache.ensure_collection(&db, "resources").await.unwrap();

    let provider = cache.ensure(&db, "resources");
    assert_eq!(provider.name(), "resources");
    provider.get().await.unwrap();

    assert_eq!(test.existence_checks(), 1);
}

async fn clear_forces_a_new_check(test: &mut DbTest) {
    let db = test.setup_db().await;
    let cache = test.collections();

    cache.ensure_collection(&db, "resources").await.unwrap();
    cache.clear();
    assert!(cache.is_empty());

    cache.ensure_collection(&db, "resources").await.unwrap();
    assert_eq!(test.existence_checks(), 2);
    assert_eq!(cache.len(), 1);
}

async fn missing_table_invalidates_everything(test: &mut DbTest) {
    let db = test.setup_db().await;
    let cache = test.collections();

    cache.ensure_collection(&db, "resources").await.unwrap();
    assert_eq!(cache.len(), 1);

    // The handle comes back even though the table is not there
    let missing = cache.ensure_collection(&db, "nope").await.unwrap();
    assert_eq!(missing.name(), "nope");
    assert!(!missing.exists().await.unwrap());

    assert!(cache.is_empty());
    assert!(test
        .operations()
        .iter()
        .any(|op| matches!(op, Operation::ClearCache)));

    // Neither the missing table nor the cleared one is trusted any more
    test.clear_log();
    cache.ensure_collection(&db, "nope").await.unwrap();
    cache.ensure_collection(&db, "resources").await.unwrap();
    assert_eq!(test.existence_checks(), 2);
}

async fn table_created_after_a_miss_is_found(test: &mut DbTest) {
    let db = test.setup_db().await;
    let cache = CollectionCache::new();

    cache.ensure_collection(&db, "late").await.unwrap();
    assert!(cache.is_empty());

    db.exec_raw("CREATE TABLE late (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();

    let late = cache.ensure_collection(&db, "late").await.unwrap();
    assert!(late.exists().await.unwrap());
    assert_eq!(cache.len(), 1);
}

async fn caches_are_independent(test: &mut DbTest) {
    let db = test.setup_db().await;

    let a = CollectionCache::new();
    let b = CollectionCache::new();
    let a2 = a.clone();

    a.ensure_collection(&db, "resources").await.unwrap();

    assert_eq!(a2.len(), 1);
    assert!(b.is_empty());
}

async fn existence_check_errors_propagate(test: &mut DbTest) {
    let db = test.setup_db().await;
    let cache = test.collections();

    test.faults()
        .fail_when(|op| matches!(op, Operation::QuerySql(stmt) if stmt.returns_rows()));

    let err = cache.ensure_collection(&db, "resources").await.unwrap_err();
    assert!(err.to_string().contains("injected failure"), "{err}");
    assert!(cache.is_empty());

    test.faults().clear();
    cache.ensure_collection(&db, "resources").await.unwrap();
    assert_eq!(cache.len(), 1);
}

tests!(
    concurrent_lookups_share_one_existence_check,
    hit_skips_existence_check,
    clear_forces_a_new_check,
    missing_table_invalidates_everything,
    table_created_after_a_miss_is_found,
    caches_are_independent,
    existence_check_errors_propagate,
);
