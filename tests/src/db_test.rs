use crate::{
    logging_driver::{DriverOp, Faults, LoggingDriver},
    Resource,
};
use patchwork::{
    mutation::Builder,
    stmt::{Insert, Statement},
    CollectionCache, Db, FieldMap, PartialMutation,
};
use patchwork_core::driver::Operation;
use patchwork_driver_sqlite::Sqlite;
use std::sync::{Arc, Mutex, Once};

/// Per-test state: the operations log, fault injection and the collection
/// cache handed to every mutation the test builds.
pub struct DbTest {
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
    faults: Faults,
    collections: CollectionCache,
}

impl DbTest {
    /// Multi-threaded so cache tests see real parallel lookups.
    pub fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime")
    }

    pub fn new() -> Self {
        init_tracing();

        Self {
            ops_log: Arc::new(Mutex::new(Vec::new())),
            faults: Faults::default(),
            collections: CollectionCache::new(),
        }
    }

    /// Fresh in-memory database with the `resources` table, always with
    /// logging enabled. Setup statements are not logged.
    pub async fn setup_db(&mut self) -> Db {
        let driver = LoggingDriver::new(Box::new(Sqlite::in_memory()));
        self.ops_log = driver.ops_log_handle();
        self.faults = driver.faults_handle();

        let db = Db::builder().build(driver).await.unwrap();
        db.exec_raw(Resource::DDL).await.unwrap();

        self.clear_log();
        db
    }

    /// A mutation builder for `resources`, already bound to `db` and this
    /// test's collection cache.
    pub fn mutation(&self, db: &Db) -> Builder<Resource> {
        PartialMutation::builder()
            .table(Resource::TABLE)
            .db(db)
            .collections(&self.collections)
    }

    /// Writes every column of each resource directly, bypassing field
    /// selection.
    pub async fn seed(&self, db: &Db, resources: &[Resource]) {
        let fields = FieldMap::of::<Resource>();

        for resource in resources {
            let columns = fields.resolve_excluding(resource, &[] as &[&str]).unwrap();

            db.exec(Insert {
                table: Resource::TABLE.to_string(),
                columns: columns.columns,
                values: columns.values,
            })
            .await
            .unwrap();
        }

        self.clear_log();
    }

    pub fn collections(&self) -> &CollectionCache {
        &self.collections
    }

    pub fn faults(&self) -> &Faults {
        &self.faults
    }

    /// Get the operations log for assertions
    pub fn ops_log(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    pub fn clear_log(&self) {
        self.ops_log.lock().unwrap().clear();
    }

    /// Logged operations, oldest first.
    pub fn operations(&self) -> Vec<Operation> {
        self.ops_log
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.clone())
            .collect()
    }

    /// Logged statements, skipping transaction control and raw SQL.
    pub fn statements(&self) -> Vec<Statement> {
        self.operations()
            .into_iter()
            .filter_map(|op| op.as_query_sql().cloned())
            .collect()
    }

    /// How many catalog lookups reached the database.
    pub fn existence_checks(&self) -> usize {
        self.statements()
            .iter()
            .filter(|stmt| matches!(stmt, Statement::TableExists(_)))
            .count()
    }
}

impl Default for DbTest {
    fn default() -> Self {
        Self::new()
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
