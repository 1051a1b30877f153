//! The transaction store facade: traits for reading and writing the user's
//! records, plus the SQLite implementations.
//!
//! Every read and write is scoped to the owning user. The only exception is
//! that category and source reads also include the shared defaults (rows
//! with no owner), which are read-only for everyone.

mod budget;
mod category;
mod expense;
mod income;
mod source;
pub mod sqlite;

pub use budget::BudgetStore;
pub use category::CategoryStore;
pub use expense::ExpenseStore;
pub use income::IncomeStore;
pub use source::SourceStore;
pub use sqlite::{
    SqliteBudgetStore, SqliteCategoryStore, SqliteExpenseStore, SqliteIncomeStore,
    SqliteSourceStore,
};
