//! Implements a SQLite backed source store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::MapRow,
    models::{DatabaseId, NewSource, Source, UserId},
    stores::SourceStore,
};

/// Stores income sources in a SQLite database.
///
/// Rows with a NULL owner are shared defaults, mirroring
/// [SqliteCategoryStore](crate::stores::SqliteCategoryStore).
#[derive(Debug, Clone)]
pub struct SqliteSourceStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteSourceStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Insert a shared default source visible to every user.
    pub fn create_shared(&self, name: &str) -> Result<Source, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let source = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO source (name, owner_id) VALUES (?1, NULL)
                 RETURNING id, name, owner_id",
            )?
            .query_row((name,), Self::map_row)?;

        Ok(source)
    }
}

impl MapRow for SqliteSourceStore {
    type ReturnType = Source;

    fn map_row(row: &Row) -> Result<Source, rusqlite::Error> {
        Ok(Source {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: row.get(2)?,
        })
    }
}

impl SourceStore for SqliteSourceStore {
    /// Create a new source owned by the given user.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, new_source: NewSource) -> Result<Source, Error> {
        let source = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO source (name, owner_id) VALUES (?1, ?2)
                 RETURNING id, name, owner_id",
            )?
            .query_row((new_source.name, new_source.owner_id), Self::map_row)?;

        Ok(source)
    }

    /// Get a source by id if it is visible to `owner_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the source does not exist or is owned by
    ///   another user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Source, Error> {
        let source = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, owner_id FROM source
                 WHERE id = ?1 AND (owner_id = ?2 OR owner_id IS NULL)",
            )?
            .query_row((id, owner_id), Self::map_row)?;

        Ok(source)
    }

    /// Get the sources visible to `owner_id`: their own plus the shared
    /// defaults.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_visible(&self, owner_id: UserId) -> Result<Vec<Source>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, owner_id FROM source
                 WHERE owner_id = ?1 OR owner_id IS NULL ORDER BY name",
            )?
            .query_map((owner_id,), Self::map_row)?
            .map(|maybe_source| maybe_source.map_err(Error::SqlError))
            .collect()
    }

    /// Rename a source owned by `owner_id`.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] for an empty name, [Error::NotFound] if the
    /// source does not exist, is a shared default, or belongs to another
    /// user.
    fn rename(&self, id: DatabaseId, owner_id: UserId, name: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE source SET name = ?1 WHERE id = ?2 AND owner_id = ?3",
            (name, id, owner_id),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Delete a source owned by `owner_id`.
    ///
    /// Referencing incomes keep existing with their source reference cleared.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the source does not exist, is a shared
    /// default, or belongs to another user.
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute(
                "DELETE FROM source WHERE id = ?1 AND owner_id = ?2",
                (id, owner_id),
            )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
