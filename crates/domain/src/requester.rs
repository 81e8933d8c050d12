//! Requester: who is behind the current request.
//!
//! Resolved once per request by the HTTP adapter and passed explicitly into
//! every service call.

use crate::id::UserId;
use crate::user::User;

/// An authenticated user as seen by permission checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// The caller of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Requester {
    /// No credentials were presented.
    #[default]
    Anonymous,
    /// A verified user.
    User(Principal),
}

impl Requester {
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::User(principal) => Some(principal),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<&User> for Requester {
    fn from(user: &User) -> Self {
        Self::User(Principal::from(user))
    }
}
