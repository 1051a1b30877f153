//! Looks up the contact details of a user for notification dispatch.
//!
//! Authentication itself is handled outside this crate; this module only
//! answers "where do alerts for this user go".

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, models::UserId};

/// A user's display name and optional notification address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// The name used to address the user in notification bodies.
    pub name: String,
    /// Where to send notifications, if the user registered an address.
    pub email: Option<String>,
}

/// Resolves a user id to their contact details.
pub trait IdentityProvider: Send + Sync {
    /// Look up the contact details for `user_id`.
    ///
    /// Returns `Ok(None)` for an unknown user; an unknown user simply
    /// receives no notifications.
    fn contact(&self, user_id: UserId) -> Result<Option<Contact>, Error>;
}

/// Reads contact details from the `user` table.
#[derive(Debug, Clone)]
pub struct SqliteIdentityProvider {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteIdentityProvider {
    /// Create a new provider for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl IdentityProvider for SqliteIdentityProvider {
    fn contact(&self, user_id: UserId) -> Result<Option<Contact>, Error> {
        let result = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT name, email FROM user WHERE id = ?1")?
            .query_row((user_id,), |row| {
                Ok(Contact {
                    name: row.get(0)?,
                    email: row.get(1)?,
                })
            });

        match result {
            Ok(contact) => Ok(Some(contact)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod sqlite_identity_provider_tests {
    use crate::{
        identity::{Contact, IdentityProvider, SqliteIdentityProvider},
        stores::sqlite::test_utils::init_db,
    };

    #[test]
    fn returns_contact_with_address() {
        let provider = SqliteIdentityProvider::new(init_db());

        assert_eq!(
            provider.contact(1).unwrap(),
            Some(Contact {
                name: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
            })
        );
    }

    #[test]
    fn returns_contact_without_address() {
        let provider = SqliteIdentityProvider::new(init_db());

        let contact = provider.contact(2).unwrap().unwrap();
        assert_eq!(contact.email, None);
    }

    #[test]
    fn returns_none_for_unknown_user() {
        let provider = SqliteIdentityProvider::new(init_db());

        assert_eq!(provider.contact(999).unwrap(), None);
    }
}
