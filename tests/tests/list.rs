use patchwork::{
    stmt::{Statement, Value},
    PartialMutation, DEFAULT_PAGE_SIZE,
};
use patchwork_core::driver::Operation;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tests::{assert_err, tests, DbTest, Resource};

/// The next-token lookahead is the only query with an offset.
fn is_probe(op: &Operation) -> bool {
    matches!(
        op.as_query_sql(),
        Some(Statement::Query(select)) if select.limit.is_some_and(|limit| limit.offset.is_some())
    )
}

#[derive(Debug, Clone, PartialEq, patchwork::Record)]
struct Tagged {
    #[column("id")]
    id: i64,

    #[column("tag")]
    tag: Option<String>,
}

async fn setup_tagged(test: &DbTest, db: &patchwork::Db) -> PartialMutation<Tagged> {
    db.exec_raw(
        "CREATE TABLE tagged (id INTEGER PRIMARY KEY, tag TEXT);
         INSERT INTO tagged (id, tag) VALUES (1, NULL), (2, NULL), (3, 'a'), (4, 'b');",
    )
    .await
    .unwrap();

    PartialMutation::<Tagged>::builder()
        .table("tagged")
        .db(db)
        .collections(test.collections())
        .include(["tag"])
        .build()
        .unwrap()
}

fn names(items: &[Resource]) -> Vec<&str> {
    items.iter().map(|r| r.name.as_str()).collect()
}

async fn seed_numbered(test: &DbTest, db: &patchwork::Db, count: usize) {
    let resources: Vec<_> = (0..count)
        .map(|i| {
            let region = if i % 2 == 0 { "even" } else { "odd" };
            Resource::new(&format!("r{i:02}"), "", i as i64).in_region(region)
        })
        .collect();

    test.seed(db, &resources).await;
}

async fn zero_limit_uses_default_page_size(test: &mut DbTest) {
    let db = test.setup_db().await;
    seed_numbered(test, &db, 35).await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let page = op.list("name", "", &[], 0).await.unwrap();
    assert_eq!(page.items.len() as u64, DEFAULT_PAGE_SIZE);
    assert!(page.has_next());
    assert!(page.probe_succeeded);

    let page = op.list("name", "", &[], -1).await.unwrap();
    assert_eq!(page.items.len(), 30);
}

async fn pages_do_not_overlap(test: &mut DbTest) {
    let db = test.setup_db().await;
    seed_numbered(test, &db, 35).await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let first = op.list("name", "", &[], 0).await.unwrap();
    let second = op
        .list("name", &first.next_page_token, &[], 0)
        .await
        .unwrap();

    assert_eq!(names(&first.items[..3]), ["r00", "r01", "r02"]);
    assert_eq!(names(&second.items), ["r30", "r31", "r32", "r33", "r34"]);
    assert_eq!(second.next_page_token, "");
    assert!(second.probe_succeeded);

    let seen: HashSet<_> = names(&first.items).into_iter().collect();
    assert!(names(&second.items).iter().all(|name| !seen.contains(name)));
}

async fn walk_every_page(test: &mut DbTest) {
    let db = test.setup_db().await;
    seed_numbered(test, &db, 7).await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let mut token = String::new();
    let mut pages = vec![];

    loop {
        let page = op.list("name", &token, &[], 3).await.unwrap();
        pages.push(names(&page.items).join(","));

        if !page.has_next() {
            break;
        }
        token = page.next_page_token;
    }

    assert_eq!(pages, ["r00,r01,r02", "r03,r04,r05", "r06"]);
}

async fn exact_multiple_of_limit_ends_with_empty_token(test: &mut DbTest) {
    let db = test.setup_db().await;
    seed_numbered(test, &db, 4).await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let first = op.list("name", "", &[], 2).await.unwrap();
    let second = op
        .list("name", &first.next_page_token, &[], 2)
        .await
        .unwrap();

    assert_eq!(names(&second.items), ["r02", "r03"]);
    assert!(!second.has_next());
}

async fn filters_are_anded(test: &mut DbTest) {
    let db = test.setup_db().await;
    seed_numbered(test, &db, 10).await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let page = op
        .list("name", "", &[("region", Value::from("odd"))], 0)
        .await
        .unwrap();
    assert_eq!(names(&page.items), ["r01", "r03", "r05", "r07", "r09"]);

    let page = op
        .list(
            "name",
            "",
            &[("region", Value::from("odd")), ("quantity", Value::I64(5))],
            0,
        )
        .await
        .unwrap();
    assert_eq!(names(&page.items), ["r05"]);
    assert!(!page.has_next());

    // The token keeps the filter's scope
    let first = op
        .list("name", "", &[("region", Value::from("even"))], 2)
        .await
        .unwrap();
    let second = op
        .list(
            "name",
            &first.next_page_token,
            &[("region", Value::from("even"))],
            2,
        )
        .await
        .unwrap();
    assert_eq!(names(&second.items), ["r04", "r06"]);
}

async fn order_column_need_not_be_the_key(test: &mut DbTest) {
    let db = test.setup_db().await;
    test.seed(
        &db,
        &[
            Resource::new("a", "", 30),
            Resource::new("b", "", 10),
            Resource::new("c", "", 20),
        ],
    )
    .await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let first = op.list("quantity", "", &[], 2).await.unwrap();
    assert_eq!(names(&first.items), ["b", "c"]);

    let second = op
        .list("quantity", &first.next_page_token, &[], 2)
        .await
        .unwrap();
    assert_eq!(names(&second.items), ["a"]);
}

async fn failed_probe_is_reported_not_raised(test: &mut DbTest) {
    let db = test.setup_db().await;
    seed_numbered(test, &db, 5).await;

    let op = test.mutation(&db).include(["name"]).build().unwrap();

    test.faults().fail_when(is_probe);

    let page = op.list("name", "", &[], 2).await.unwrap();
    assert_eq!(names(&page.items), ["r00", "r01"]);
    assert_eq!(page.next_page_token, "");
    assert!(!page.probe_succeeded);
    assert!(!page.has_next());

    test.faults().clear();

    let page = op.list("name", "", &[], 2).await.unwrap();
    assert!(page.probe_succeeded);
    assert!(page.has_next());
}

async fn malformed_token_is_an_error(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = test.mutation(&db).include(["name"]).build().unwrap();

    assert_err!(op.list("name", "{not a token", &[], 0).await);
}

async fn empty_table_has_no_next_page(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = test.mutation(&db).include(["name"]).build().unwrap();

    let page = op.list("name", "", &[], 0).await.unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_next());
    assert!(page.probe_succeeded);
}

async fn null_order_value_is_not_a_token(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = setup_tagged(test, &db).await;

    // NULLs sort first; the row after the page also has a NULL tag
    let page = op.list("tag", "", &[], 1).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].tag, None);
    assert_eq!(page.next_page_token, "");
    assert!(!page.probe_succeeded);
    assert!(!page.has_next());
}

async fn paging_resumes_after_null_order_values(test: &mut DbTest) {
    let db = test.setup_db().await;
    let op = setup_tagged(test, &db).await;

    let first = op.list("tag", "", &[], 2).await.unwrap();
    assert!(first.items.iter().all(|item| item.tag.is_none()));
    assert!(first.probe_succeeded);
    assert!(first.has_next());

    let second = op
        .list("tag", &first.next_page_token, &[], 2)
        .await
        .unwrap();
    let ids: Vec<_> = second.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, [3, 4]);
    assert!(!second.has_next());

    // A token naming NULL could only ever match nothing
    assert_err!(op.list("tag", "\"Null\"", &[], 2).await);
}

tests!(
    zero_limit_uses_default_page_size,
    pages_do_not_overlap,
    walk_every_page,
    exact_multiple_of_limit_ends_with_empty_token,
    filters_are_anded,
    order_column_need_not_be_the_key,
    failed_probe_is_reported_not_raised,
    malformed_token_is_an_error,
    empty_table_has_no_next_page,
    null_order_value_is_not_a_token,
    paging_resumes_after_null_order_values,
);
