//! The domain models: categories, sources, incomes, expenses, and budgets.
//!
//! Every record is owned by exactly one user, except [Category] and [Source]
//! rows with no owner, which are global defaults shared read-only between all
//! users.

mod budget;
mod category;
mod expense;
mod income;
mod source;

pub use budget::{Budget, NewBudget};
pub use category::{Category, NewCategory};
pub use expense::{Expense, NewExpense};
pub use income::{Income, NewIncome};
pub use source::{NewSource, Source};

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// Alias for the integer type used to identify the owning user of a record.
pub type UserId = i64;
