//! This file defines the `Income` type, an event where money was earned.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseId, UserId},
};

/// An event where money was earned.
///
/// The source reference is weak, like the category reference on
/// [Expense](crate::models::Expense).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// The ID of the income.
    pub id: DatabaseId,
    /// The user that owns the income.
    pub owner_id: UserId,
    /// The source of the income, if any.
    pub source_id: Option<DatabaseId>,
    /// The amount of money earned.
    pub amount: f64,
    /// When the money was earned.
    pub date: Date,
    /// A text description of where the income came from.
    pub description: String,
}

/// The data required to create a new [Income].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewIncome {
    /// The user that will own the income.
    pub owner_id: UserId,
    /// The source of the income, if any.
    pub source_id: Option<DatabaseId>,
    /// The amount of money earned.
    pub amount: f64,
    /// When the money was earned.
    pub date: Date,
    /// A text description of where the income came from.
    #[serde(default)]
    pub description: String,
}

impl NewIncome {
    /// Check that the income data can be written to the store.
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
