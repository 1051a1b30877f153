//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, DatabaseId, NewCategory, UserId},
};

/// Creates and retrieves expense categories.
pub trait CategoryStore {
    /// Create a new category owned by the given user.
    fn create(&self, new_category: NewCategory) -> Result<Category, Error>;

    /// Get a category visible to `owner_id`: their own or a shared default.
    ///
    /// Returns [Error::NotFound] if the category does not exist or is owned
    /// by another user.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Category, Error>;

    /// Get all categories visible to `owner_id` (their own plus the shared
    /// defaults), ordered by name.
    fn get_visible(&self, owner_id: UserId) -> Result<Vec<Category>, Error>;

    /// Rename a category owned by `owner_id`.
    ///
    /// Shared defaults have no owner and therefore cannot be renamed through
    /// this method; attempting to do so returns [Error::NotFound].
    fn rename(&self, id: DatabaseId, owner_id: UserId, name: &str) -> Result<(), Error>;

    /// Delete a category owned by `owner_id`.
    ///
    /// Expenses and budgets referencing the category keep existing; their
    /// references resolve to a fallback label from then on. Shared defaults
    /// cannot be deleted; attempting to do so returns [Error::NotFound].
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error>;
}
