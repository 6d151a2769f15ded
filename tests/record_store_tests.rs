use records_desk::DeskError;
use records_desk::db::{self, Grade, NewRecord, RecordStore};

async fn fresh_store() -> RecordStore {
    let pool = db::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    RecordStore::new(pool)
}

fn new_record(date: &str, grade: Grade, department: &str) -> NewRecord {
    NewRecord {
        date: date.to_string(),
        grade,
        department: department.to_string(),
        content: "午休巡查".to_string(),
    }
}

#[tokio::test]
async fn schema_creation_is_idempotent() {
    let store = fresh_store().await;
    store.ensure_schema().await.expect("first ensure");
    store.ensure_schema().await.expect("second ensure");

    let tables: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'records'")
            .fetch_all(store.pool())
            .await
            .expect("introspect tables");
    assert_eq!(tables.len(), 1);
    assert!(!store.ensure_grade_column().await.expect("grade check"));
}

#[tokio::test]
async fn legacy_table_gains_grade_column_once() {
    let store = fresh_store().await;
    sqlx::query(
        r#"CREATE TABLE records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            department TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )"#,
    )
    .execute(store.pool())
    .await
    .expect("legacy table");
    sqlx::query("INSERT INTO records (date, department, content) VALUES ('2020-09-01', '教务处', 'old')")
        .execute(store.pool())
        .await
        .expect("legacy row");

    store.ensure_schema().await.expect("ensure on legacy table");
    assert!(store.ensure_grade_column().await.expect("add column"));
    assert!(!store.ensure_grade_column().await.expect("column present"));

    let records = store.list().await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].grade, None);
}

#[tokio::test]
async fn grade_check_surfaces_unrelated_failures() {
    let store = fresh_store().await;
    store.pool().close().await;
    let err = store
        .ensure_grade_column()
        .await
        .expect_err("closed pool must fail");
    assert!(matches!(err, DeskError::DatabaseError(_)));
}

#[tokio::test]
async fn insert_without_table_is_a_store_error() {
    let store = fresh_store().await;
    let err = store
        .create(&new_record("2026-01-01", Grade::SeniorOne, "教务处"))
        .await
        .expect_err("no table yet");
    assert!(matches!(err, DeskError::DatabaseError(_)));
}

#[tokio::test]
async fn list_is_newest_first_and_empty_when_no_rows() {
    let store = fresh_store().await;
    store.ensure_schema().await.expect("schema");
    assert!(store.list().await.expect("empty list").is_empty());

    let first = store
        .create(&new_record("2026-01-01", Grade::SeniorOne, "教务处"))
        .await
        .expect("insert");
    let second = store
        .create(&new_record("2026-01-02", Grade::SeniorTwo, "政教处"))
        .await
        .expect("insert");
    assert!(second > first);

    let records = store.list().await.expect("list");
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(records[0].grade.as_deref(), Some("高二"));
}

#[tokio::test]
async fn list_keeps_store_timestamp_text_and_null_timestamps() {
    let store = fresh_store().await;
    store.ensure_schema().await.expect("schema");
    sqlx::query(
        "INSERT INTO records (date, grade, department, content, created_at) \
         VALUES ('2026-10-19', '高一', '教务处', 'stamped', '2026-10-19 05:44:46')",
    )
    .execute(store.pool())
    .await
    .expect("stamped row");
    sqlx::query(
        "INSERT INTO records (date, grade, department, content, created_at) \
         VALUES ('2020-09-01', NULL, '教务处', 'legacy', NULL)",
    )
    .execute(store.pool())
    .await
    .expect("legacy row");

    let records = store.list().await.expect("list with null created_at");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].created_at.as_deref(), Some("2026-10-19 05:44:46"));
    assert_eq!(records[0].content, "stamped");
    assert_eq!(records[1].created_at, None);
    assert_eq!(records[1].grade, None);
}

#[tokio::test]
async fn delete_reports_affected_rows() {
    let store = fresh_store().await;
    store.ensure_schema().await.expect("schema");
    let id = store
        .create(&new_record("2026-01-01", Grade::SeniorOne, "教务处"))
        .await
        .expect("insert");

    assert_eq!(store.delete(id + 100).await.expect("delete missing"), 0);
    assert_eq!(store.delete(id).await.expect("delete"), 1);
    assert_eq!(store.delete(id).await.expect("delete again"), 0);
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn stats_use_the_supplied_date() {
    let store = fresh_store().await;
    store.ensure_schema().await.expect("schema");
    for (date, grade, department) in [
        ("2026-10-19", Grade::SeniorOne, "教务处"),
        ("2026-10-19", Grade::SeniorOne, "政教处"),
        ("2026-10-19", Grade::SeniorTwo, "政教处"),
        ("2026-10-18", Grade::SeniorTwo, "政教处"),
    ] {
        store
            .create(&new_record(date, grade, department))
            .await
            .expect("insert");
    }

    let stats = store.stats("2026-10-19").await.expect("stats");
    assert_eq!(stats.total, 4);
    assert_eq!(stats.today, 3);
    assert_eq!(stats.by_department.iter().map(|d| d.count).sum::<i64>(), 4);
    let zhengjiao = stats
        .by_department
        .iter()
        .find(|d| d.department == "政教处")
        .expect("department row");
    assert_eq!(zhengjiao.count, 3);
    assert_eq!(stats.by_grade.len(), 2);
    assert_eq!(stats.by_grade.iter().map(|g| g.count).sum::<i64>(), 4);

    let other_day = store.stats("2026-10-17").await.expect("stats");
    assert_eq!(other_day.today, 0);
    assert_eq!(other_day.total, 4);
}
