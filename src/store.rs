// 🗄️ Animal Store - CRUD over the adoptable_pets table
//
// One connection, opened at construction and held for the store's lifetime.
// Rows are keyed by `name` for update/delete; two animals sharing a name collide.
// Not Sync: callers serialize access or open one store per thread.

use crate::animal::{AnimalKind, AnimalRecord};
use crate::error::{Result, StoreError};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Animals read back from storage, plus how many rows had an unrecognised type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalListing {
    pub animals: Vec<AnimalRecord>,
    pub skipped: usize,
}

pub fn setup_database(conn: &Connection) -> rusqlite::Result<()> {
    // WAL for crash recovery (in-memory databases answer "memory")
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

    // ==========================================================================
    // Adoptable pets (surrogate id is internal; `name` stays the lookup key)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS adoptable_pets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL,
            breed TEXT NOT NULL,
            name TEXT NOT NULL,
            sterilized INTEGER CHECK (sterilized IN (0, 1)),
            arrived TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_pets_name ON adoptable_pets(name)",
        [],
    )?;

    Ok(())
}

fn insert_row(conn: &Connection, record: &AnimalRecord) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO adoptable_pets (type, breed, name, sterilized, arrived)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            record.species(),
            record.breed(),
            record.name(),
            record.sterilized(),
            record.date_arrived(),
        ],
    )
}

fn update_row(conn: &Connection, record: &AnimalRecord) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE adoptable_pets
         SET type = ?1, breed = ?2, sterilized = ?3, arrived = ?4
         WHERE name = ?5",
        params![
            record.species(),
            record.breed(),
            record.sterilized(),
            record.date_arrived(),
            record.name(),
        ],
    )
}

fn delete_row(conn: &Connection, name: &str) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM adoptable_pets WHERE name = ?1", params![name])
}

/// Turn a single-row statement result into the boolean contract, logging misses
fn exactly_one(operation: &'static str, name: &str, result: rusqlite::Result<usize>) -> bool {
    match result {
        Ok(1) => {
            debug!(operation, animal = name, "Statement applied");
            true
        }
        Ok(rows) => {
            warn!(operation, animal = name, rows, "Expected exactly one row; nothing changed");
            false
        }
        Err(e) => {
            error!(operation, animal = name, error = %e, "Statement failed");
            false
        }
    }
}

pub struct AnimalStore {
    conn: Connection,
}

impl AnimalStore {
    /// Open (or create) the registry database at `path`
    ///
    /// Failure here is unrecoverable for the caller; there is no retry.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Connect {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Opened animal registry");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Connect {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Self::from_connection(conn)
    }

    /// Wrap an existing connection, creating the table if needed
    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn).map_err(StoreError::Schema)?;
        Ok(AnimalStore { conn })
    }

    /// Cheap round-trip to check the connection still answers
    pub fn is_connected(&self) -> bool {
        self.conn
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }

    /// Every animal ordered by name, plus a count of rows whose type is neither cat nor dog
    pub fn load_all(&self) -> Result<AnimalListing> {
        let mut stmt = self.conn.prepare(
            "SELECT type, breed, name, sterilized, arrived
             FROM adoptable_pets
             ORDER BY name COLLATE NOCASE, name",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let kind: Option<String> = row.get(0)?;
                let breed: Option<String> = row.get(1)?;
                let name: Option<String> = row.get(2)?;
                let sterilized: Option<i64> = row.get(3)?;
                let arrived: Option<String> = row.get(4)?;

                // Tri-state collapses here: only a stored 1 reads back as sterilized
                Ok(kind.as_deref().and_then(AnimalKind::parse).map(|kind| {
                    AnimalRecord::new(
                        kind,
                        breed.unwrap_or_default(),
                        name.unwrap_or_default(),
                        Some(sterilized == Some(1)),
                        arrived.unwrap_or_default(),
                    )
                }))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let total = rows.len();
        let animals: Vec<AnimalRecord> = rows.into_iter().flatten().collect();
        let skipped = total - animals.len();

        Ok(AnimalListing { animals, skipped })
    }

    /// Every cat and dog ordered by name; rows of any other type are left out
    pub fn get_all(&self) -> Result<Vec<AnimalRecord>> {
        let listing = self.load_all()?;

        if listing.skipped > 0 {
            warn!(skipped = listing.skipped, "Rows with unknown animal type were skipped");
        }

        Ok(listing.animals)
    }

    /// Number of stored rows, recognised type or not
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM adoptable_pets", [], |row| row.get(0))?;

        Ok(count)
    }

    /// Insert one row. Does not validate; callers check `validate()` first.
    pub fn add(&self, record: &AnimalRecord) -> bool {
        exactly_one("add", record.name(), insert_row(&self.conn, record))
    }

    /// Overwrite type, breed, sterilized and arrival for the row named `record.name()`
    ///
    /// Zero or several matching rows leave storage untouched and return `false`.
    pub fn update(&self, record: &AnimalRecord) -> bool {
        let result = self.conn.unchecked_transaction().and_then(|tx| {
            let rows = update_row(&tx, record)?;
            if rows == 1 {
                tx.commit()?;
            }
            Ok(rows)
        });

        exactly_one("update", record.name(), result)
    }

    /// Delete the row named `record.name()`; all other fields are ignored
    ///
    /// Zero or several matching rows leave storage untouched and return `false`.
    pub fn delete(&self, record: &AnimalRecord) -> bool {
        let result = self.conn.unchecked_transaction().and_then(|tx| {
            let rows = delete_row(&tx, record.name())?;
            if rows == 1 {
                tx.commit()?;
            }
            Ok(rows)
        });

        exactly_one("delete", record.name(), result)
    }

    /// Replace the row named `original.name()` with `updated`, in one transaction
    ///
    /// Either both the delete and the insert land, or neither does.
    pub fn rename(&self, original: &AnimalRecord, updated: &AnimalRecord) -> bool {
        let result = self.conn.unchecked_transaction().and_then(|tx| {
            let deleted = delete_row(&tx, original.name())?;
            if deleted != 1 {
                warn!(
                    from = original.name(),
                    rows = deleted,
                    "Rename source did not match exactly one row"
                );
                return Ok(false);
            }

            if insert_row(&tx, updated)? != 1 {
                return Ok(false);
            }

            tx.commit()?;
            Ok(true)
        });

        match result {
            Ok(true) => {
                info!(from = original.name(), to = updated.name(), "Renamed animal");
                true
            }
            Ok(false) => false,
            Err(e) => {
                error!(
                    from = original.name(),
                    to = updated.name(),
                    error = %e,
                    "Rename failed; rolled back"
                );
                false
            }
        }
    }
}
