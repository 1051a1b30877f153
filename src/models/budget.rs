//! This file defines the `Budget` type, a spending limit for a category over
//! a date window.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseId, UserId},
};

/// A spending limit for a category over an inclusive date window.
///
/// A budget is *active* for a date `d` iff `start_date <= d <= end_date`.
/// Budget windows may overlap other budgets for the same category; the store
/// does not prevent duplicates and each active budget is evaluated
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: DatabaseId,
    /// The user that owns the budget.
    pub owner_id: UserId,
    /// The category the budget applies to, if any.
    pub category_id: Option<DatabaseId>,
    /// The spending limit.
    pub amount: f64,
    /// The first day the budget applies to.
    pub start_date: Date,
    /// The last day the budget applies to.
    pub end_date: Date,
}

impl Budget {
    /// Whether the budget window contains `date`.
    pub fn is_active(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// The data required to create a new [Budget].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBudget {
    /// The user that will own the budget.
    pub owner_id: UserId,
    /// The category the budget applies to, if any.
    pub category_id: Option<DatabaseId>,
    /// The spending limit.
    pub amount: f64,
    /// The first day the budget applies to.
    pub start_date: Date,
    /// The last day the budget applies to.
    pub end_date: Date,
}

impl NewBudget {
    /// Check that the budget data can be written to the store.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if the amount is zero or negative,
    /// or [Error::InvalidBudgetWindow] if the start date falls after the end
    /// date.
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if self.start_date > self.end_date {
            return Err(Error::InvalidBudgetWindow(self.start_date, self.end_date));
        }

        Ok(())
    }
}
