//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    db::MapRow,
    models::{Budget, DatabaseId, NewBudget, UserId},
    stores::BudgetStore,
};

/// Stores budgets in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl MapRow for SqliteBudgetStore {
    type ReturnType = Budget;

    fn map_row(row: &Row) -> Result<Budget, rusqlite::Error> {
        Ok(Budget {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            category_id: row.get(2)?,
            amount: row.get(3)?,
            start_date: row.get(4)?,
            end_date: row.get(5)?,
        })
    }
}

impl BudgetStore for SqliteBudgetStore {
    /// Create a new budget in the database.
    ///
    /// Overlapping windows for the same category are allowed.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, new_budget: NewBudget) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO budget (owner_id, category_id, amount, start_date, end_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, owner_id, category_id, amount, start_date, end_date",
            )?
            .query_row(
                (
                    new_budget.owner_id,
                    new_budget.category_id,
                    new_budget.amount,
                    new_budget.start_date,
                    new_budget.end_date,
                ),
                Self::map_row,
            )?;

        Ok(budget)
    }

    /// Retrieve a budget in the database by its `id`, scoped to its owner.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the budget does not exist or belongs to another
    ///   user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, owner_id, category_id, amount, start_date, end_date FROM budget
                 WHERE id = ?1 AND owner_id = ?2",
            )?
            .query_row((id, owner_id), Self::map_row)?;

        Ok(budget)
    }

    /// Retrieve all budgets owned by `owner_id`, most recent window first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, owner_id, category_id, amount, start_date, end_date FROM budget
                 WHERE owner_id = ?1 ORDER BY start_date DESC, id DESC",
            )?
            .query_map((owner_id,), Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve the owner's budgets whose window contains `as_of`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_active(&self, owner_id: UserId, as_of: Date) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, owner_id, category_id, amount, start_date, end_date FROM budget
                 WHERE owner_id = ?1 AND start_date <= ?2 AND end_date >= ?2
                 ORDER BY id",
            )?
            .query_map((owner_id, as_of.to_string()), Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve the owner's budgets for `category_id` whose window contains
    /// `date`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_matching(
        &self,
        owner_id: UserId,
        category_id: DatabaseId,
        date: Date,
    ) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, owner_id, category_id, amount, start_date, end_date FROM budget
                 WHERE owner_id = ?1 AND category_id = ?2 AND start_date <= ?3 AND end_date >= ?3
                 ORDER BY id",
            )?
            .query_map((owner_id, category_id, date.to_string()), Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the stored budget, matched by id and owner.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no row matched, or [Error::SqlError] for
    /// any other SQL error.
    fn update(&self, budget: &Budget) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE budget SET category_id = ?1, amount = ?2, start_date = ?3, end_date = ?4
             WHERE id = ?5 AND owner_id = ?6",
            (
                budget.category_id,
                budget.amount,
                budget.start_date,
                budget.end_date,
                budget.id,
                budget.owner_id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Delete a budget, matched by id and owner.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no row matched, or [Error::SqlError] for
    /// any other SQL error.
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute(
                "DELETE FROM budget WHERE id = ?1 AND owner_id = ?2",
                (id, owner_id),
            )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
