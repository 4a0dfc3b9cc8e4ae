use patchwork::{CollectionCache, MutationOptions, PartialMutation};
use pretty_assertions::assert_eq;
use tests::{assert_err, tests, DbTest, Resource};

async fn missing_required_options(test: &mut DbTest) {
    let db = test.setup_db().await;
    let collections = CollectionCache::new();

    let err = assert_err!(PartialMutation::<Resource>::builder()
        .db(&db)
        .collections(&collections)
        .include(["name"])
        .build());
    assert!(err.is_invalid_options());
    assert_eq!(err.to_string(), "invalid options: table is required");

    let err = assert_err!(PartialMutation::<Resource>::builder()
        .table("")
        .db(&db)
        .collections(&collections)
        .include(["name"])
        .build());
    assert_eq!(err.to_string(), "invalid options: table is required");

    let err = assert_err!(PartialMutation::<Resource>::builder()
        .table("resources")
        .collections(&collections)
        .include(["name"])
        .build());
    assert_eq!(err.to_string(), "invalid options: db is required");

    let err = assert_err!(PartialMutation::<Resource>::builder()
        .table("resources")
        .db(&db)
        .include(["name"])
        .build());
    assert_eq!(err.to_string(), "invalid options: collections is required");
}

async fn include_or_exclude_is_required(test: &mut DbTest) {
    let db = test.setup_db().await;

    let err = assert_err!(test.mutation(&db).build());
    assert!(err.is_invalid_options());
    assert_eq!(
        err.to_string(),
        "invalid options: PartialMutation, included or excluded fields are required"
    );

    // Empty lists count as missing
    let err = assert_err!(test
        .mutation(&db)
        .include(Vec::<String>::new())
        .exclude(Vec::<String>::new())
        .build());
    assert!(err.is_invalid_options());

    // Update overrides alone are not enough
    let err = assert_err!(test.mutation(&db).include_update(["name"]).build());
    assert!(err.is_invalid_options());

    test.mutation(&db).exclude(["name"]).build().unwrap();
}

async fn later_options_win(test: &mut DbTest) {
    let db = test.setup_db().await;

    let preset = MutationOptions {
        table: Some("archived_resources".to_string()),
        include: Some(vec!["display_name".to_string()]),
        ..Default::default()
    };

    // The preset overrides what came before it...
    let op = test
        .mutation(&db)
        .include(["name"])
        .options(preset.clone())
        .build()
        .unwrap();
    assert_eq!(op.table(), "archived_resources");
    assert_eq!(
        op.resolve_insert(&Resource::new("CAN", "Canada", 3), &[])
            .unwrap()
            .columns,
        ["display_name"]
    );

    // ...and what comes after overrides the preset
    let op = test
        .mutation(&db)
        .options(preset)
        .table("resources")
        .build()
        .unwrap();
    assert_eq!(op.table(), "resources");
}

async fn merge_keeps_unset_fields(test: &mut DbTest) {
    let db = test.setup_db().await;

    let mut base = MutationOptions {
        table: Some("resources".to_string()),
        db: Some(db.clone()),
        collections: Some(test.collections().clone()),
        exclude: Some(vec!["create_time".to_string()]),
        ..Default::default()
    };

    base.merge(MutationOptions {
        include_update: Some(vec!["quantity".to_string()]),
        ..Default::default()
    });

    assert_eq!(base.table.as_deref(), Some("resources"));
    assert_eq!(base.exclude, Some(vec!["create_time".to_string()]));
    assert_eq!(base.include_update, Some(vec!["quantity".to_string()]));

    let op = PartialMutation::<Resource>::builder()
        .options(base)
        .build()
        .unwrap();
    assert_eq!(op.field_map().len(), 5);
    assert_eq!(op.db().driver().url(), "sqlite::memory:");
}

async fn building_does_no_io(test: &mut DbTest) {
    let db = test.setup_db().await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();
    let _copy = op.clone();

    assert!(test.operations().is_empty());
}

tests!(
    missing_required_options,
    include_or_exclude_is_required,
    later_options_win,
    merge_keeps_unset_fields,
    building_does_no_io,
);
