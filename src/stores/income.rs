//! Defines the income store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{DatabaseId, Income, NewIncome, UserId},
};

/// Handles the creation and retrieval of incomes.
pub trait IncomeStore {
    /// Create a new income in the store.
    fn create(&self, new_income: NewIncome) -> Result<Income, Error>;

    /// Retrieve an income owned by `owner_id` from the store.
    ///
    /// Returns [Error::NotFound] if the income does not exist or belongs to
    /// another user.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Income, Error>;

    /// Retrieve the incomes owned by `owner_id`, most recent first.
    ///
    /// `date_range` restricts the result to incomes dated within the range
    /// (inclusive).
    fn get_by_owner(
        &self,
        owner_id: UserId,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Vec<Income>, Error>;

    /// Overwrite the stored income with `income`, matched by id and owner.
    ///
    /// Returns [Error::NotFound] if the income does not exist or belongs to
    /// another user.
    fn update(&self, income: &Income) -> Result<(), Error>;

    /// Delete an income owned by `owner_id`.
    ///
    /// Returns [Error::NotFound] if the income does not exist or belongs to
    /// another user.
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error>;
}
