use patchwork::{stmt::Statement, Executor};
use patchwork_core::driver::{operation, Operation};
use pretty_assertions::assert_eq;
use tests::{tests, DbTest, Resource};

#[test]
fn dropped_outside_runtime_discards_connection() {
    let runtime = DbTest::runtime();
    let mut test = DbTest::new();

    let db = runtime.block_on(test.setup_db());
    let tx = runtime.block_on(db.transaction()).unwrap();
    assert!(tx.is_transaction());

    // No runtime is entered here, so no rollback task can be spawned
    drop(tx);

    assert!(!test
        .operations()
        .contains(&Operation::Transaction(operation::Transaction::Rollback)));

    // The pool replaces the discarded connection
    runtime.block_on(db.exec_raw("SELECT 1")).unwrap();
}

async fn insert_in_transaction_skips_read_back(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let mut canada = Resource::new("CAN", "Canada", 3);

    let mut tx = db.transaction().await.unwrap();
    assert!(tx.is_transaction());

    op.insert(&mut tx, &mut canada, "name", "CAN", &[])
        .await
        .unwrap();

    // The caller's values are kept as passed in
    assert_eq!(canada.display_name, "Canada");
    assert_eq!(canada.create_time, "");

    tx.commit().await.unwrap();

    let statements = test.statements();
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0], Statement::Insert(_)));
    assert_eq!(test.existence_checks(), 0);

    let stored: Resource = db
        .collection("resources")
        .find()
        .and("name", "CAN")
        .one()
        .await
        .unwrap();
    assert_eq!(stored.display_name, "");
    assert_eq!(stored.create_time, "server-default");
}

async fn update_in_transaction_skips_read_back(test: &mut DbTest) {
    let db = test.setup_db().await;
    test.seed(&db, &[Resource::new("CAN", "Canada", 3)]).await;

    let op = test
        .mutation(&db)
        .include(["display_name", "quantity"])
        .build()
        .unwrap();

    let mut canada = Resource::new("CAN", "Canada", 8);

    let mut tx = db.transaction().await.unwrap();
    op.update(&mut tx, &mut canada, "name", "CAN", &["quantity"], &[])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let ops = test.operations();
    assert_eq!(
        ops.first(),
        Some(&Operation::Transaction(operation::Transaction::Start))
    );
    assert_eq!(
        ops.last(),
        Some(&Operation::Transaction(operation::Transaction::Commit))
    );
    assert_eq!(test.statements().len(), 1);

    let stored: Resource = db
        .collection("resources")
        .find()
        .and("name", "CAN")
        .one()
        .await
        .unwrap();
    assert_eq!(stored.quantity, 8);
}

async fn rollback_discards_writes(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let mut canada = Resource::new("CAN", "Canada", 3);

    let mut tx = db.transaction().await.unwrap();
    op.insert(&mut tx, &mut canada, "name", "CAN", &[])
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let rows = db.collection("resources").find().rows().await.unwrap();
    assert!(rows.is_empty());
}

async fn dropped_transaction_rolls_back(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let mut canada = Resource::new("CAN", "Canada", 3);

    {
        let mut tx = db.transaction().await.unwrap();
        op.insert(&mut tx, &mut canada, "name", "CAN", &[])
            .await
            .unwrap();
    }

    // Waits for the connection the rollback task is holding
    let rows = db.collection("resources").find().rows().await.unwrap();
    assert!(rows.is_empty());

    assert!(test
        .operations()
        .contains(&Operation::Transaction(operation::Transaction::Rollback)));
}

async fn db_is_not_a_transaction(test: &mut DbTest) {
    let db = test.setup_db().await;
    assert!(!db.is_transaction());
}

tests!(
    insert_in_transaction_skips_read_back,
    update_in_transaction_skips_read_back,
    rollback_discards_writes,
    dropped_transaction_rolls_back,
    db_is_not_a_transaction,
);
