//! Student Store Module
//! SQLite-backed persistence for student records.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};
use thiserror::Error;

use crate::data::{NewStudent, Student};

/// Folder beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".gradebook";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "gradebook.sqlite";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Roll number {roll} already exists")]
    DuplicateRoll { roll: String },
    #[error("No student with id {id}")]
    NotFound { id: i64 },
    #[error("Could not locate a home directory for the database file")]
    DataDir,
    #[error("Database error: {0}")]
    Sqlite(#[from] SqlError),
    #[error("Failed to create data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Owns the SQLite connection. All calls are single synchronous statements;
/// the connection never leaves the GUI thread.
pub struct StudentStore {
    conn: Connection,
}

impl StudentStore {
    /// Open (or create) the database in the per-user data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&default_db_path()?)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    /// Purely in-memory store, used by the test suite.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                roll TEXT NOT NULL UNIQUE,
                marks INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Insert a new student, returning the hydrated row so the caller can
    /// push it straight into the in-memory roster.
    pub fn add(&self, new: &NewStudent) -> Result<Student, StoreError> {
        self.conn
            .execute(
                "INSERT INTO students (name, roll, marks) VALUES (?1, ?2, ?3)",
                params![new.name, new.roll, new.marks],
            )
            .map_err(|err| map_unique_constraint(err, &new.roll))?;

        Ok(Student {
            id: self.conn.last_insert_rowid(),
            name: new.name.clone(),
            roll: new.roll.clone(),
            marks: new.marks,
        })
    }

    /// Update all editable fields of an existing student by id.
    pub fn update(&self, id: i64, new: &NewStudent) -> Result<(), StoreError> {
        let updated = self
            .conn
            .execute(
                "UPDATE students SET name = ?1, roll = ?2, marks = ?3 WHERE id = ?4",
                params![new.name, new.roll, new.marks, id],
            )
            .map_err(|err| map_unique_constraint(err, &new.roll))?;

        if updated == 0 {
            Err(StoreError::NotFound { id })
        } else {
            Ok(())
        }
    }

    /// Remove a student row by id.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])?;

        if deleted == 0 {
            Err(StoreError::NotFound { id })
        } else {
            Ok(())
        }
    }

    /// Retrieve every student in insertion order. The query doubles as the
    /// single source of truth for how the roster table is ordered.
    pub fn fetch_all(&self) -> Result<Vec<Student>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, roll, marks FROM students ORDER BY id")?;

        let students = stmt
            .query_map([], |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    roll: row.get(2)?,
                    marks: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }
}

/// Resolve the absolute database path inside the user's home directory.
fn default_db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::DataDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// Coerce SQLite constraint errors into a human-readable message. The only
/// constraint in the schema is the uniqueness of roll numbers.
fn map_unique_constraint(err: SqlError, roll: &str) -> StoreError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StoreError::DuplicateRoll {
            roll: roll.to_string(),
        }
    } else {
        StoreError::Sqlite(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, roll: &str, marks: i64) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            roll: roll.to_string(),
            marks,
        }
    }

    #[test]
    fn test_add_then_fetch() {
        let store = StudentStore::in_memory().unwrap();
        let added = store.add(&sample("Alice", "R-01", 91)).unwrap();
        assert!(added.id > 0);

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], added);
    }

    #[test]
    fn test_duplicate_roll_is_rejected() {
        let store = StudentStore::in_memory().unwrap();
        store.add(&sample("Alice", "R-01", 91)).unwrap();

        let err = store.add(&sample("Bob", "R-01", 55)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateRoll { roll } if roll == "R-01"));
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_replaces_fields() {
        let store = StudentStore::in_memory().unwrap();
        let added = store.add(&sample("Alice", "R-01", 91)).unwrap();

        store.update(added.id, &sample("Alice B.", "R-02", 78)).unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all[0].name, "Alice B.");
        assert_eq!(all[0].roll, "R-02");
        assert_eq!(all[0].marks, 78);
    }

    #[test]
    fn test_update_duplicate_roll_is_rejected() {
        let store = StudentStore::in_memory().unwrap();
        store.add(&sample("Alice", "R-01", 91)).unwrap();
        let bob = store.add(&sample("Bob", "R-02", 55)).unwrap();

        let err = store.update(bob.id, &sample("Bob", "R-01", 55)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateRoll { .. }));
    }

    #[test]
    fn test_delete_removes_row() {
        let store = StudentStore::in_memory().unwrap();
        let added = store.add(&sample("Alice", "R-01", 91)).unwrap();

        store.delete(added.id).unwrap();
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_id_reports_not_found() {
        let store = StudentStore::in_memory().unwrap();
        assert!(matches!(
            store.delete(42).unwrap_err(),
            StoreError::NotFound { id: 42 }
        ));
        assert!(matches!(
            store.update(42, &sample("Nobody", "R-99", 0)).unwrap_err(),
            StoreError::NotFound { id: 42 }
        ));
    }

    #[test]
    fn test_fetch_all_orders_by_id() {
        let store = StudentStore::in_memory().unwrap();
        store.add(&sample("Carol", "R-03", 64)).unwrap();
        store.add(&sample("Alice", "R-01", 91)).unwrap();
        store.add(&sample("Bob", "R-02", 55)).unwrap();

        let rolls: Vec<String> = store
            .fetch_all()
            .unwrap()
            .into_iter()
            .map(|s| s.roll)
            .collect();
        assert_eq!(rolls, vec!["R-03", "R-01", "R-02"]);
    }
}
