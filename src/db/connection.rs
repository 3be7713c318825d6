use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::StoreError;

// Thread-local connection slot, remembered together with the file it points at.
thread_local! {
    static DB_CONN: RefCell<Option<(PathBuf, Connection)>> = RefCell::new(None);
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open or reuse this worker thread's connection and run `f(conn)`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = match slot.as_ref() {
                    Some((path, _)) => path != &self.path,
                    None => true,
                };
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| StoreError::Unavailable(format!("open database failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(StoreError::Unavailable("connection slot empty".into())),
                }
            })
            .map_err(|_| StoreError::Unavailable("thread-local connection unavailable".into()))?
    }
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), StoreError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| StoreError::Unavailable(format!("failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| StoreError::Unavailable(format!("failed to apply schema: {e}")))
    })?;

    tracing::info!(schema = schema_path, db = %db.path().display(), "database initialized");
    Ok(())
}
