use levain_core::{Bakery, BakeryBuilder};
use tempfile::TempDir;

/// Helper function to create a bakery over a fresh database
pub async fn create_test_bakery() -> (TempDir, Bakery) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let bakery = BakeryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create bakery");
    (temp_dir, bakery)
}
