//! Durable SQLite backing for the Compass company store
//!
//! The normal-mode [`CompanyStore`] implementation. Rows live in a
//! `companies` table whose schema is bootstrapped on open; identifiers are
//! assigned by SQLite on insert. Each trait call is a single statement (or
//! a single transaction), so calls are atomic with respect to each other.

#![warn(unreachable_pub)]

use compass_core::{sanitize, Company, CompanyStore, StoreError};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS companies (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL,
        location TEXT
    )
";

/// Persistent [`CompanyStore`] over a SQLite database.
///
/// The connection sits behind a mutex; every operation acquires it for the
/// duration of one statement, which gives the per-call atomicity the web
/// layer relies on. No capacity bound.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and bootstrap the schema
    ///
    /// # Errors
    /// - `StoreError::Storage` if the file cannot be opened or the schema
    ///   cannot be applied
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(to_storage_error)?;
        Self::bootstrap(conn)
    }

    /// Open an in-memory database (used by tests)
    ///
    /// # Errors
    /// - `StoreError::Storage` if the schema cannot be applied
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(to_storage_error)?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, []).map_err(to_storage_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

}

impl CompanyStore for SqliteStore {
    fn list(&self) -> Result<Vec<Company>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id, name, location FROM companies ORDER BY id ASC")
            .map_err(to_storage_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Company::from_stored(row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(to_storage_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_error)
    }

    fn get(&self, id: i64) -> Result<Company, StoreError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, name, location FROM companies WHERE id = ?1",
            params![id],
            |row| Ok(Company::from_stored(row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(to_storage_error)?
        .ok_or(StoreError::NotFound(id))
    }

    fn add(&self, company: &Company) -> Result<(), StoreError> {
        // Sanitize on the way in regardless of how the record was built
        let name = sanitize(company.name());
        let location = company.location().map(sanitize).filter(|l| !l.is_empty());

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO companies (name, location) VALUES (?1, ?2)",
            params![name, location],
        )
        .map_err(to_storage_error)?;
        tracing::debug!(id = conn.last_insert_rowid(), "company stored");
        Ok(())
    }

    fn update(&self, company: &Company) -> Result<(), StoreError> {
        let id = company.id.ok_or(StoreError::NotFound(0))?;
        let name = sanitize(company.name());
        let location = company.location().map(sanitize).filter(|l| !l.is_empty());

        let conn = self.conn.lock();
        let changed = conn
            .execute(
                "UPDATE companies SET name = ?1, location = ?2 WHERE id = ?3",
                params![name, location, id],
            )
            .map_err(to_storage_error)?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let changed = conn
            .execute("DELETE FROM companies WHERE id = ?1", params![id])
            .map_err(to_storage_error)?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn to_storage_error(err: rusqlite::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_empty_and_assigns_ids_on_insert() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.list().unwrap().is_empty());

        store.add(&Company::new("Acme", "NYC")).unwrap();
        store.add(&Company::new("Globex", "Springfield")).unwrap();

        let rows = store.list().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, Some(1));
        assert_eq!(rows[1].id, Some(2));
    }

    #[test]
    fn add_sanitizes_and_round_trips() {
        let store = SqliteStore::in_memory().unwrap();
        store.add(&Company::new("Acme!!!", "NYC")).unwrap();

        let stored = store.get(1).unwrap();
        assert_eq!(stored.name(), "Acme");
        assert_eq!(stored.location(), Some("NYC"));
        assert!(stored.id.is_some());
    }

    #[test]
    fn add_ignores_incoming_id() {
        let store = SqliteStore::in_memory().unwrap();
        let mut company = Company::new("Acme", "");
        company.id = Some(500);
        store.add(&company).unwrap();

        assert!(matches!(store.get(500), Err(StoreError::NotFound(500))));
        assert_eq!(store.get(1).unwrap().name(), "Acme");
    }

    #[test]
    fn update_rewrites_fields_and_keeps_id() {
        let store = SqliteStore::in_memory().unwrap();
        store.add(&Company::new("Acme", "NYC")).unwrap();

        let mut company = store.get(1).unwrap();
        company.set_name("Acme Global");
        company.set_location("Boston, MA");
        store.update(&company).unwrap();

        let stored = store.get(1).unwrap();
        assert_eq!(stored.id, Some(1));
        assert_eq!(stored.name(), "Acme Global");
        assert_eq!(stored.location(), Some("Boston, MA"));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        let mut company = Company::new("Ghost", "");
        company.id = Some(9);
        assert!(matches!(store.update(&company), Err(StoreError::NotFound(9))));
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        store.add(&Company::new("Acme", "NYC")).unwrap();

        store.delete(1).unwrap();
        assert!(matches!(store.get(1), Err(StoreError::NotFound(1))));
        assert!(matches!(store.delete(1), Err(StoreError::NotFound(1))));
    }

    #[test]
    fn rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compass.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.add(&Company::new("Acme", "NYC")).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let rows = store.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "Acme");
    }
}
