//! Storage layer for Kinsenas
//!
//! A flat key-value store of JSON values with atomic file writes.

pub mod file_io;
pub mod kv;

pub use file_io::{read_json, write_json_atomic};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

use crate::config::paths::KinsenasPaths;
use crate::error::KinsenasError;

/// Persisted keys
pub mod keys {
    pub const BUDGET_ROWS: &str = "budget.rows";
    pub const BUDGET_FIRST_CUTOFF_DAY: &str = "budget.firstCutoffDay";
    pub const BUDGET_SECOND_CUTOFF_DAY: &str = "budget.secondCutoffDay";
    pub const EXPENSES_BY_MONTH: &str = "expenses.byMonth";
}

/// Open the file-backed store under the configured data directory
pub fn open_store(paths: &KinsenasPaths) -> Result<JsonFileStore, KinsenasError> {
    paths.ensure_directories()?;
    Ok(JsonFileStore::new(paths.data_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KinsenasPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_store(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(store.dir(), &paths.data_dir());
    }
}
