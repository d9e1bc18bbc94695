use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tally_core::config::STORAGE_DB_FILENAME;
use tally_core::db::Database;
use tally_core::error::Error as CoreError;

pub static DB_CACHE: LazyLock<Mutex<HashMap<PathBuf, Arc<Database>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Get or create the database stored in `data_dir`
///
/// If the database is already open, returns the cached instance so every
/// Python object working on the same directory shares one connection.
/// Otherwise opens it, runs migrations, and caches it.
pub fn get_or_create_database<P: AsRef<Path>>(data_dir: P) -> Result<Arc<Database>, CoreError> {
    let db_path = data_dir.as_ref().join(STORAGE_DB_FILENAME);

    let mut cache = DB_CACHE.lock();

    if let Some(db) = cache.get(&db_path) {
        tracing::debug!(path = %db_path.display(), "reusing cached database");
        return Ok(Arc::clone(db));
    }

    let db = Arc::new(Database::open(&db_path)?);
    cache.insert(db_path.clone(), Arc::clone(&db));

    tracing::debug!(path = %db_path.display(), "opened database");

    Ok(db)
}

/// Clear the database cache (useful for testing)
pub fn clear_cache() {
    DB_CACHE.lock().clear();
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_cache_reuse() {
        let data_dir = env::temp_dir().join(format!("tally_py_{}", uuid::Uuid::new_v4()));

        let db1 = get_or_create_database(&data_dir).unwrap();
        let db2 = get_or_create_database(&data_dir).unwrap();

        assert!(Arc::ptr_eq(&db1, &db2));
        assert!(data_dir.join(STORAGE_DB_FILENAME).exists());

        clear_cache();
        std::fs::remove_dir_all(data_dir).ok();
    }
}
