//! Durable key-value mirror over SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the records mirror.
//! - Configure connection pragmas and create the mirror table before
//!   returning a usable adapter.
//!
//! # Invariants
//! - Returned adapters have the `mirror` table present.
//! - One row per well-known key; values are whole JSON collections.

use super::{StorageAdapter, StorageResult};
use log::{error, info};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const MIRROR_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS mirror (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// SQLite-backed mirror adapter.
pub struct SqliteStorage {
    conn: Connection,
}

/// Opens a mirror database file and ensures its schema exists.
///
/// # Side effects
/// - Emits `mirror_open` logging events with duration and status.
pub fn open_mirror(path: impl AsRef<Path>) -> StorageResult<SqliteStorage> {
    let started_at = Instant::now();
    info!("event=mirror_open module=storage status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=mirror_open module=storage status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    bootstrap(conn, started_at, "file")
}

/// Opens an in-memory mirror database, mainly for tests and smoke runs.
pub fn open_mirror_in_memory() -> StorageResult<SqliteStorage> {
    let started_at = Instant::now();
    info!("event=mirror_open module=storage status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=mirror_open module=storage status=error mode=memory duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    bootstrap(conn, started_at, "memory")
}

fn bootstrap(conn: Connection, started_at: Instant, mode: &str) -> StorageResult<SqliteStorage> {
    let prepare = || -> StorageResult<()> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(MIRROR_SCHEMA_SQL)?;
        Ok(())
    };

    match prepare() {
        Ok(()) => {
            info!(
                "event=mirror_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(SqliteStorage { conn })
        }
        Err(err) => {
            error!(
                "event=mirror_open module=storage status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

impl StorageAdapter for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM mirror WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO mirror (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM mirror WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::open_mirror_in_memory;
    use crate::storage::StorageAdapter;

    #[test]
    fn upsert_overwrites_existing_value() {
        let mut storage = open_mirror_in_memory().unwrap();
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_deletes_the_row_entirely() {
        let mut storage = open_mirror_in_memory().unwrap();
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);

        // removing an absent key stays a no-op
        storage.remove("k").unwrap();
    }
}
