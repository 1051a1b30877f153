//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    identity::SqliteIdentityProvider,
    notify::Notifier,
    stores::{
        SqliteBudgetStore, SqliteCategoryStore, SqliteExpenseStore, SqliteIncomeStore,
        SqliteSourceStore,
    },
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The transport used for budget-exceeded notifications.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, notifier: Arc<dyn Notifier>) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            notifier,
        })
    }

    /// The store for expenses.
    pub fn expense_store(&self) -> SqliteExpenseStore {
        SqliteExpenseStore::new(self.db_connection.clone())
    }

    /// The store for incomes.
    pub fn income_store(&self) -> SqliteIncomeStore {
        SqliteIncomeStore::new(self.db_connection.clone())
    }

    /// The store for budgets.
    pub fn budget_store(&self) -> SqliteBudgetStore {
        SqliteBudgetStore::new(self.db_connection.clone())
    }

    /// The store for expense categories.
    pub fn category_store(&self) -> SqliteCategoryStore {
        SqliteCategoryStore::new(self.db_connection.clone())
    }

    /// The store for income sources.
    pub fn source_store(&self) -> SqliteSourceStore {
        SqliteSourceStore::new(self.db_connection.clone())
    }

    /// The provider of user contact details for notification dispatch.
    pub fn identity_provider(&self) -> SqliteIdentityProvider {
        SqliteIdentityProvider::new(self.db_connection.clone())
    }
}
