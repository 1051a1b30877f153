//! This file defines the `Expense` type, an event where money was spent.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseId, UserId},
};

/// An event where money was spent.
///
/// The category reference is weak: the category may be deleted independently,
/// and read paths resolve a dangling or missing reference to a fallback label
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: DatabaseId,
    /// The user that owns the expense.
    pub owner_id: UserId,
    /// The category of the expense, if any.
    pub category_id: Option<DatabaseId>,
    /// The amount of money spent.
    pub amount: f64,
    /// When the money was spent.
    pub date: Date,
    /// A text description of what the expense was for.
    pub description: String,
}

/// The data required to create a new [Expense].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewExpense {
    /// The user that will own the expense.
    pub owner_id: UserId,
    /// The category of the expense, if any.
    pub category_id: Option<DatabaseId>,
    /// The amount of money spent.
    pub amount: f64,
    /// When the money was spent.
    pub date: Date,
    /// A text description of what the expense was for.
    #[serde(default)]
    pub description: String,
}

impl NewExpense {
    /// Check that the expense data can be written to the store.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if the amount is zero or negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}
