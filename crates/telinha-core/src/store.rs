use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TelinhaError;

const SCHEMA_V1: &str = include_str!("../../../migrations/001_initial.sql");

/// SQLite-backed key-value store for persisted catalog state.
///
/// Values are opaque strings; the mirror layer decides what goes into them.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, TelinhaError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, TelinhaError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// The value stored under a key, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, TelinhaError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Write a value, replacing any previous one under the same key.
    pub fn set(&self, key: &str, value: &str) -> Result<(), TelinhaError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Run schema migrations using `PRAGMA user_version` for version tracking.
fn run_migrations(conn: &Connection) -> Result<(), TelinhaError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = Store::open_memory().unwrap();
        assert!(store.get("telinha_featured").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let store = Store::open_memory().unwrap();
        store.set("telinha_featured", "hero-1").unwrap();
        assert_eq!(store.get("telinha_featured").unwrap().as_deref(), Some("hero-1"));

        // Overwrite.
        store.set("telinha_featured", "2").unwrap();
        assert_eq!(store.get("telinha_featured").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telinha.db");

        {
            let store = Store::open(&path).unwrap();
            store.set("k", "v").unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
