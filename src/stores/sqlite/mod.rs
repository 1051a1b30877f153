//! SQLite backed implementations of the store traits.

mod budget;
mod category;
mod expense;
mod income;
mod source;

pub use budget::SqliteBudgetStore;
pub use category::SqliteCategoryStore;
pub use expense::SqliteExpenseStore;
pub use income::SqliteIncomeStore;
pub use source::SqliteSourceStore;

#[cfg(test)]
pub(crate) mod test_utils {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::db::initialize;

    /// An in-memory database with the application schema and two users.
    ///
    /// User 1 has a notification address, user 2 does not.
    pub(crate) fn init_db() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        conn.execute(
            "INSERT INTO user (name, email) VALUES ('alice', 'alice@example.com')",
            (),
        )
        .unwrap();
        conn.execute("INSERT INTO user (name, email) VALUES ('bob', NULL)", ())
            .unwrap();

        Arc::new(Mutex::new(conn))
    }
}
