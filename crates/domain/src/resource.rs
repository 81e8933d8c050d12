//! Resource: the common shape of every record served by a collection and
//! detail endpoint.
//!
//! A resource is built from a *draft* (the create payload), changed through
//! a *patch* (the partial-update payload) and checked with
//! [`Resource::validate`] before every write.

use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::{FoodHubError, ValidationError};
use crate::requester::Requester;

/// A record that can be listed, created, retrieved, patched and deleted.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Typed identifier of the record.
    type Id: Copy + Eq + Hash + Display + FromStr + Send + Sync + 'static;

    /// Payload accepted on creation.
    type Draft: Send;

    /// Payload accepted on partial update. Absent fields mean "keep".
    type Patch: Send;

    /// Human-readable name used in not-found errors and logs.
    const NAME: &'static str;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// Build a new record from a draft on behalf of `requester`.
    ///
    /// Server-assigned fields (ids, timestamps, ownership) are filled in here
    /// and never taken from the draft.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] listing every missing field and
    /// broken rule, or [`FoodHubError::Unauthenticated`] when the record needs an
    /// owner and the requester is anonymous.
    fn from_draft(draft: Self::Draft, requester: &Requester) -> Result<Self, FoodHubError>;

    /// Overwrite the fields present in `patch`, leaving the others untouched.
    fn apply(&mut self, patch: Self::Patch);

    /// Check field rules.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] listing every broken rule.
    fn validate(&self) -> Result<(), FoodHubError>;
}

/// Check a required text field: not blank and, when `max` is given, no
/// longer than `max` characters.
pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(())
}
