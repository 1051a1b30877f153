//! Defines the budget store trait.

use time::Date;

use crate::{
    Error,
    models::{Budget, DatabaseId, NewBudget, UserId},
};

/// Handles the creation and retrieval of budgets.
pub trait BudgetStore {
    /// Create a new budget in the store.
    fn create(&self, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Retrieve a budget owned by `owner_id` from the store.
    ///
    /// Returns [Error::NotFound] if the budget does not exist or belongs to
    /// another user.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Budget, Error>;

    /// Retrieve all budgets owned by `owner_id`, most recent window first.
    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Budget>, Error>;

    /// Retrieve the budgets owned by `owner_id` whose window contains
    /// `as_of`.
    fn get_active(&self, owner_id: UserId, as_of: Date) -> Result<Vec<Budget>, Error>;

    /// Retrieve the budgets owned by `owner_id` for `category_id` whose
    /// window contains `date`.
    ///
    /// Overlapping budgets for one category are all returned; callers
    /// evaluate each independently.
    fn get_matching(
        &self,
        owner_id: UserId,
        category_id: DatabaseId,
        date: Date,
    ) -> Result<Vec<Budget>, Error>;

    /// Overwrite the stored budget with `budget`, matched by id and owner.
    ///
    /// Returns [Error::NotFound] if the budget does not exist or belongs to
    /// another user.
    fn update(&self, budget: &Budget) -> Result<(), Error>;

    /// Delete a budget owned by `owner_id`.
    ///
    /// Returns [Error::NotFound] if the budget does not exist or belongs to
    /// another user.
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error>;
}
