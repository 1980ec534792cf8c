use crate::error::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

/// Owned SQLite handle for session persistence
///
/// The connection lives behind a mutex so one handle can be shared across
/// threads; there is no process-wide instance, callers own their database.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening session database at {:?}", path);
        let conn = Connection::open(path)?;
        Self::with_migrations(conn)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_migrations(conn)
    }

    fn with_migrations(conn: Connection) -> Result<Self> {
        conn.execute_batch(include_str!("../../migrations/001_init.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }
}
