//! Domain models mirroring the `students` table.

use serde::Serialize;

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// Primary key from the database. Edit and delete flows bubble this id
    /// back to the persistence layer.
    pub id: i64,
    pub name: String,
    /// Roll number, unique across the roster.
    pub roll: String,
    pub marks: i64,
}

/// Payload for a student that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub roll: String,
    pub marks: i64,
}
