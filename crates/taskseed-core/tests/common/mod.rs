use jiff::Timestamp;
use taskseed_core::SqliteStore;
use tempfile::TempDir;

/// Creates a store over `list` in a fresh temporary database
pub async fn create_test_store(list: &str) -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::builder(list)
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// Wednesday 2023-01-04, noon UTC
pub fn wednesday_noon() -> Timestamp {
    "2023-01-04T12:00:00Z".parse().expect("valid timestamp")
}
