use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

// ─── Key/value storage ──────────────────────────────────────────────────────

pub struct StorageRepo;

impl StorageRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(conn: &Connection, key: &str) -> Result<bool> {
        let n = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_get_missing_key() {
        assert_eq!(StorageRepo::get(&conn(), "nope").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let conn = conn();
        StorageRepo::set(&conn, "k", "one").unwrap();
        StorageRepo::set(&conn, "k", "two").unwrap();
        assert_eq!(StorageRepo::get(&conn, "k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_remove() {
        let conn = conn();
        StorageRepo::set(&conn, "k", "v").unwrap();
        assert!(StorageRepo::remove(&conn, "k").unwrap());
        assert!(!StorageRepo::remove(&conn, "k").unwrap());
        assert_eq!(StorageRepo::get(&conn, "k").unwrap(), None);
    }
}
