//! Defines the expense store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{DatabaseId, Expense, NewExpense, UserId},
};

/// Handles the creation and retrieval of expenses.
pub trait ExpenseStore {
    /// Create a new expense in the store.
    fn create(&self, new_expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve an expense owned by `owner_id` from the store.
    ///
    /// Returns [Error::NotFound] if the expense does not exist or belongs to
    /// another user.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Expense, Error>;

    /// Retrieve the expenses owned by `owner_id`, most recent first.
    ///
    /// `date_range` restricts the result to expenses dated within the range
    /// (inclusive).
    fn get_by_owner(
        &self,
        owner_id: UserId,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Vec<Expense>, Error>;

    /// Overwrite the stored expense with `expense`, matched by id and owner.
    ///
    /// Returns [Error::NotFound] if the expense does not exist or belongs to
    /// another user.
    fn update(&self, expense: &Expense) -> Result<(), Error>;

    /// Delete an expense owned by `owner_id`.
    ///
    /// Returns [Error::NotFound] if the expense does not exist or belongs to
    /// another user.
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error>;
}
