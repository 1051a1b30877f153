//! This file defines the `Category` type used to label expenses and budgets.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{DatabaseId, UserId},
};

/// A label for expenses and budgets, e.g., 'Groceries', 'Rent', 'Transport'.
///
/// A category with no owner is a global default: it is visible to and
/// selectable by every user but cannot be edited or deleted by anyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseId,
    /// The name of the category.
    pub name: String,
    /// The user that owns the category, or `None` for a shared default.
    pub owner_id: Option<UserId>,
}

/// The data required to create a new [Category].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCategory {
    /// The name of the category.
    pub name: String,
    /// The user that will own the category.
    pub owner_id: UserId,
}

impl NewCategory {
    /// Check that the category data can be written to the store.
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

#[cfg(test)]
mod new_category_tests {
    use crate::{Error, models::NewCategory};

    #[test]
    fn validate_fails_on_empty_name() {
        let new_category = NewCategory {
            name: String::new(),
            owner_id: 1,
        };

        assert_eq!(new_category.validate(), Err(Error::EmptyName));
    }

    #[test]
    fn validate_succeeds_on_non_empty_name() {
        let new_category = NewCategory {
            name: "Groceries".to_string(),
            owner_id: 1,
        };

        assert_eq!(new_category.validate(), Ok(()));
    }
}
