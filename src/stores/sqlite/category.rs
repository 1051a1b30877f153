//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::MapRow,
    models::{Category, DatabaseId, NewCategory, UserId},
    stores::CategoryStore,
};

/// Stores categories in a SQLite database.
///
/// Rows with a NULL owner are shared defaults: visible to every user through
/// the read methods, untouchable through the write methods.
#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Insert a shared default category visible to every user.
    ///
    /// Intended for seeding; regular users cannot create, edit, or delete
    /// shared defaults.
    pub fn create_shared(&self, name: &str) -> Result<Category, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO category (name, owner_id) VALUES (?1, NULL)
                 RETURNING id, name, owner_id",
            )?
            .query_row((name,), Self::map_row)?;

        Ok(category)
    }
}

impl MapRow for SqliteCategoryStore {
    type ReturnType = Category;

    fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: row.get(2)?,
        })
    }
}

impl CategoryStore for SqliteCategoryStore {
    /// Create a new category owned by the given user.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, new_category: NewCategory) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO category (name, owner_id) VALUES (?1, ?2)
                 RETURNING id, name, owner_id",
            )?
            .query_row((new_category.name, new_category.owner_id), Self::map_row)?;

        Ok(category)
    }

    /// Get a category by id if it is visible to `owner_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the category does not exist or is owned by
    ///   another user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, owner_id FROM category
                 WHERE id = ?1 AND (owner_id = ?2 OR owner_id IS NULL)",
            )?
            .query_row((id, owner_id), Self::map_row)?;

        Ok(category)
    }

    /// Get the categories visible to `owner_id`: their own plus the shared
    /// defaults.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_visible(&self, owner_id: UserId) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, owner_id FROM category
                 WHERE owner_id = ?1 OR owner_id IS NULL ORDER BY name",
            )?
            .query_map((owner_id,), Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }

    /// Rename a category owned by `owner_id`.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] for an empty name, [Error::NotFound] if the
    /// category does not exist, is a shared default, or belongs to another
    /// user.
    fn rename(&self, id: DatabaseId, owner_id: UserId, name: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1 WHERE id = ?2 AND owner_id = ?3",
            (name, id, owner_id),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Delete a category owned by `owner_id`.
    ///
    /// Referencing expenses and budgets keep existing with their category
    /// reference cleared.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist, is a shared
    /// default, or belongs to another user.
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute(
                "DELETE FROM category WHERE id = ?1 AND owner_id = ?2",
                (id, owner_id),
            )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
