//! Defines the source store trait.

use crate::{
    Error,
    models::{DatabaseId, NewSource, Source, UserId},
};

/// Creates and retrieves income sources.
pub trait SourceStore {
    /// Create a new source owned by the given user.
    fn create(&self, new_source: NewSource) -> Result<Source, Error>;

    /// Get a source visible to `owner_id`: their own or a shared default.
    ///
    /// Returns [Error::NotFound] if the source does not exist or is owned by
    /// another user.
    fn get(&self, id: DatabaseId, owner_id: UserId) -> Result<Source, Error>;

    /// Get all sources visible to `owner_id` (their own plus the shared
    /// defaults), ordered by name.
    fn get_visible(&self, owner_id: UserId) -> Result<Vec<Source>, Error>;

    /// Rename a source owned by `owner_id`.
    ///
    /// Shared defaults have no owner and therefore cannot be renamed through
    /// this method; attempting to do so returns [Error::NotFound].
    fn rename(&self, id: DatabaseId, owner_id: UserId, name: &str) -> Result<(), Error>;

    /// Delete a source owned by `owner_id`.
    ///
    /// Incomes referencing the source keep existing; their references resolve
    /// to a fallback label from then on. Shared defaults cannot be deleted;
    /// attempting to do so returns [Error::NotFound].
    fn delete(&self, id: DatabaseId, owner_id: UserId) -> Result<(), Error>;
}
