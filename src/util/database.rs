// src/util/database.rs
// Core database struct with connection management only

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{QuestError, Result};

#[derive(Clone)]
pub struct Database {
    pub(crate) app_conn: Arc<Mutex<Connection>>,
}

// Manual Debug implementation since Mutex<Connection> doesn't implement Debug
impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("app_conn", &"Arc<Mutex<Connection>>")
            .finish()
    }
}

impl Database {
    /// Opens (or creates) the database file, creating parent directories as needed.
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Self::from_connection(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Database {
            app_conn: Arc::new(Mutex::new(conn)),
        };

        db.init_all_schemas()?;

        Ok(db)
    }

    /// Locks the shared connection for the duration of one operation.
    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.app_conn.lock().map_err(|_| QuestError::LockPoisoned)
    }

    fn init_all_schemas(&self) -> Result<()> {
        use crate::modules::user_quest::database::init_user_quest_schema;

        let conn = self.conn()?;
        init_user_quest_schema(&conn)
    }

    /// Runs `f` inside one transaction under a single lock. The transaction
    /// is rolled back when `f` returns an error.
    pub(crate) fn transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;

        Ok(value)
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
