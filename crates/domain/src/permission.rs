//! Permission predicates evaluated before every resource operation.
//!
//! A predicate answers twice: once for the request as a whole
//! ([`Permission::has_permission`]) and, for detail operations, once more
//! against the loaded record ([`Permission::has_object_permission`]).
//! Anonymous requesters are refused with
//! [`FoodHubError::Unauthenticated`], known ones with
//! [`FoodHubError::PermissionDenied`].

use crate::error::{AuthError, FoodHubError};
use crate::id::UserId;
use crate::requester::Requester;

/// The operation a requester is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Retrieve,
    Update,
    Delete,
}

impl Action {
    /// Read-only actions.
    #[must_use]
    pub fn is_safe(self) -> bool {
        matches!(self, Self::List | Self::Retrieve)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A record with a single owning user.
pub trait Authored {
    fn author(&self) -> UserId;
}

/// An access rule for records of type `T`.
pub trait Permission<T> {
    /// Request-level check, run before any record is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] or
    /// [`FoodHubError::PermissionDenied`] when the action is refused.
    fn has_permission(&self, requester: &Requester, action: Action) -> Result<(), FoodHubError>;

    /// Record-level check, run after the record was found.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] or
    /// [`FoodHubError::PermissionDenied`] when the action is refused.
    fn has_object_permission(
        &self,
        _requester: &Requester,
        _action: Action,
        _object: &T,
    ) -> Result<(), FoodHubError> {
        Ok(())
    }
}

/// Everyone may do everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAny;

impl<T> Permission<T> for AllowAny {
    fn has_permission(&self, _requester: &Requester, _action: Action) -> Result<(), FoodHubError> {
        Ok(())
    }
}

/// Only administrators, for every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAdminUser;

impl<T> Permission<T> for IsAdminUser {
    fn has_permission(&self, requester: &Requester, _action: Action) -> Result<(), FoodHubError> {
        match requester {
            Requester::Anonymous => Err(AuthError::NotAuthenticated.into()),
            Requester::User(principal) if principal.is_admin => Ok(()),
            Requester::User(_) => Err(FoodHubError::PermissionDenied),
        }
    }
}

/// Anyone may read; creating needs an account; only the author may change
/// or delete a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsCreator;

impl<T: Authored> Permission<T> for IsCreator {
    fn has_permission(&self, requester: &Requester, action: Action) -> Result<(), FoodHubError> {
        if action == Action::Create && !requester.is_authenticated() {
            return Err(AuthError::NotAuthenticated.into());
        }
        Ok(())
    }

    fn has_object_permission(
        &self,
        requester: &Requester,
        action: Action,
        object: &T,
    ) -> Result<(), FoodHubError> {
        if action.is_safe() {
            return Ok(());
        }
        match requester {
            Requester::Anonymous => Err(AuthError::NotAuthenticated.into()),
            Requester::User(principal) if principal.id == object.author() => Ok(()),
            Requester::User(_) => Err(FoodHubError::PermissionDenied),
        }
    }
}
