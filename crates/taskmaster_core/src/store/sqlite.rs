//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the key-value store.
//! - Keep schema bootstrap inside the persistence boundary.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Returned stores have the `kv` table fully bootstrapped.

use super::{Store, StoreResult};
use log::{error, info};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Instant;

const SCHEMA_VERSION: u32 = 1;

/// Durable key-value store over a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a store file, creating and bootstrapping it when missing.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");
        let conn = Connection::open(path)?;
        Self::bootstrap(conn, started_at, "file")
    }

    /// Opens an in-memory store, useful for tests and ephemeral sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=memory");
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, started_at, "memory")
    }

    fn bootstrap(conn: Connection, started_at: Instant, mode: &str) -> StoreResult<Self> {
        let result = conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            PRAGMA user_version = {SCHEMA_VERSION};"
        ));

        match result {
            Ok(()) => {
                info!(
                    "event=store_open module=store status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
        Ok(())
    }
}
