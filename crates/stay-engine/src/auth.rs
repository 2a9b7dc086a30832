//! Credential directory backing the mutation gateway.
//!
//! Passwords are compared by plaintext equality. This is a convenience check
//! for a single-household tool, not a security boundary. A hashed verifier can
//! replace [`UserDirectory`] behind the [`Authenticator`] trait without
//! changing the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, StayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// A user to be created through the administration screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Username/password pair presented to the gateway.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The credential predicate the gateway depends on.
pub trait Authenticator {
    /// The user matching `username` and `password`, or `None`. With
    /// `require_admin`, non-administrators never match.
    fn authenticate(&self, username: &str, password: &str, require_admin: bool) -> Option<&User>;
}

/// In-memory user list.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
    next_id: u64,
}

impl UserDirectory {
    /// # Errors
    /// Returns `StayError::InvalidUser` for a blank username or password,
    /// `StayError::DuplicateUsername` if two seeded users share a username, and
    /// `StayError::InvalidId` for a repeated id or `u64::MAX`.
    pub fn from_users(users: Vec<User>) -> Result<Self> {
        let mut directory = Self {
            users: Vec::with_capacity(users.len()),
            next_id: 1,
        };
        for user in users {
            directory.check_new(&user.username, &user.password)?;
            if directory.users.iter().any(|u| u.id == user.id) {
                return Err(StayError::InvalidId(format!("duplicate user id {}", user.id)));
            }
            let successor = user.id.0.checked_add(1).ok_or_else(|| {
                StayError::InvalidId(format!("user id {} is out of range", user.id))
            })?;
            directory.next_id = directory.next_id.max(successor);
            directory.users.push(user);
        }
        Ok(directory)
    }

    /// Create a regular (non-administrator) user.
    ///
    /// # Errors
    /// Returns `StayError::InvalidUser` for a blank username or password,
    /// `StayError::DuplicateUsername` if the username is taken, and
    /// `StayError::InvalidId` once the identity counter is exhausted.
    pub fn add_user(&mut self, new_user: NewUser) -> Result<User> {
        self.check_new(&new_user.username, &new_user.password)?;
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| StayError::InvalidId("user identities exhausted".to_string()))?;

        let user = User {
            id: UserId(self.next_id),
            username: new_user.username,
            password: new_user.password,
            is_admin: false,
        };
        self.next_id = next_id;
        self.users.push(user.clone());
        info!(id = %user.id, username = %user.username, "User added");
        Ok(user)
    }

    /// # Errors
    /// Returns `StayError::NotFound` for an unknown id and
    /// `StayError::ProtectedUser` for an administrator.
    pub fn delete_user(&mut self, id: UserId) -> Result<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| StayError::NotFound(format!("user {}", id)))?;

        if self.users[index].is_admin {
            warn!(%id, "Refused to delete administrator");
            return Err(StayError::ProtectedUser(self.users[index].username.clone()));
        }

        let removed = self.users.remove(index);
        info!(%id, username = %removed.username, "User deleted");
        Ok(removed)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.clone()
    }

    fn check_new(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(StayError::InvalidUser(
                "username and password are required".to_string(),
            ));
        }
        if self.find_by_username(username).is_some() {
            return Err(StayError::DuplicateUsername(username.to_string()));
        }
        Ok(())
    }
}

impl Authenticator for UserDirectory {
    fn authenticate(&self, username: &str, password: &str, require_admin: bool) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .filter(|u| !require_admin || u.is_admin)
    }
}
