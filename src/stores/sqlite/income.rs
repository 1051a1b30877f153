//! Implements a SQLite backed income store.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::Date;

use crate::{
    Error,
    db::MapRow,
    models::{DatabaseId, Income, NewIncome, UserId},
    stores::IncomeStore,
};

/// Stores incomes in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteIncomeStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteIncomeStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl MapRow for SqliteIncomeStore {
    type ReturnType = Income;

    fn map_row(row: &Row) -> Result<Income, rusqlite::Error> {
        Ok(Income {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            source_id: row.get(2)?,
            amount: row.get(3)?,
            date: row.get(4)?,
            description: row.get(5)?,
        })
    }
}

impl IncomeStore for SqliteIncomeStore {
    /// Create a new income in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&self, new_income: NewIncome) -> Result<Income, Error> {
        let income = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO income (owner_id, source_id, amount, date, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, owner_id, source_id, amount, date, description",
            )?
            .query_row(
                (
                    new_income.owner_id,
                    new_income.source_id,
                    new_income.amount,
                    new_income.date,
                    new_income.description,
                ),
                Self::map_row,
            )?;

        Ok(income)
    }

    /// Retrieve an income in the database by its `id`, scoped to its owner.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the income does not exist or belongs to another
    ///   user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Income, Error> {
        let income = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, owner_id, source_id, amount, date, description FROM income
                 WHERE id = ?1 AND owner_id = ?2",
            )?
            .query_row((id, owner_id), Self::map_row)?;

        Ok(income)
    }

    /// Query for the owner's incomes, ordered by date descending.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_by_owner(
        &self,
        owner_id: UserId,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Vec<Income>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, owner_id, source_id, amount, date, description FROM income
             WHERE owner_id = ?1"
                .to_string(),
        ];
        let mut query_parameters = vec![Value::Integer(owner_id)];

        if let Some(date_range) = date_range {
            query_string_parts.push(format!(
                "AND date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(date_range.start().to_string()));
            query_parameters.push(Value::Text(date_range.end().to_string()));
        }

        query_string_parts.push("ORDER BY date DESC, id DESC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_income| maybe_income.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the stored income, matched by id and owner.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no row matched, or [Error::SqlError] for
    /// any other SQL error.
    fn update(&self, income: &Income) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE income SET source_id = ?1, amount = ?2, date = ?3, description = ?4
             WHERE id = ?5 AND owner_id = ?6",
            (
                income.source_id,
                income.amount,
                income.date,
                &income.description,
                income.id,
                income.owner_id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Delete an income, matched by id and owner.
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
                "DELETE FROM income WHERE id = ?1 AND owner_id = ?2",
                (id, owner_id),
            )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
