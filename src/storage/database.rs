//! SQLite-backed key-value store using rusqlite.
//!
//! Blocking SQLite calls run on tokio's blocking pool so the engine's
//! async callers are never stalled by disk I/O.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

use crate::storage::kv::{KeyValueStore, StoreError};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};

/// Key-value store persisted in a SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::initialize(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::initialize(conn)
    }

    /// Initialize the database schema.
    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        let current_version = schema_version(&conn)?;
        if current_version < CURRENT_VERSION {
            migrate(&conn, current_version)?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }
}

/// Get the current schema version.
fn schema_version(conn: &Connection) -> Result<i32, StoreError> {
    let result: SqliteResult<i32> = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    );

    match result {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(StoreError::QueryFailed(e.to_string())),
    }
}

/// Run database migrations.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), StoreError> {
    if from_version < 1 {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
            [CURRENT_VERSION],
        )
        .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        tracing::info!("Database migrated to version {}", CURRENT_VERSION);
    }

    Ok(())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))
        })
        .await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            Ok(())
        })
        .await
    }
}
