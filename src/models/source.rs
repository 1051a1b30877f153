//! This file defines the `Source` type used to label incomes.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{DatabaseId, UserId},
};

/// A label for where income came from, e.g., 'Salary', 'Dividends'.
///
/// Symmetric to [Category](crate::models::Category): a source with no owner
/// is a shared default, visible to all users but owned by none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// The ID of the source.
    pub id: DatabaseId,
    /// The name of the source.
    pub name: String,
    /// The user that owns the source, or `None` for a shared default.
    pub owner_id: Option<UserId>,
}

/// The data required to create a new [Source].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSource {
    /// The name of the source.
    pub name: String,
    /// The user that will own the source.
    pub owner_id: UserId,
}

impl NewSource {
    /// Check that the source data can be written to the store.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if the name is an empty string.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(())
    }
}
