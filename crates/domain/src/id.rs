//! Record identifiers.
//!
//! Every record is keyed by a random UUID. [`Id`] carries the record type as
//! a phantom parameter, so a [`FoodId`] cannot be passed where a
//! [`FoodTypeId`] is expected even though both are plain UUIDs on the wire.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::comment::Comment;
use crate::food::Food;
use crate::food_type::FoodType;
use crate::user::User;

/// UUID identifying a record of type `R`.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<R> {
    uuid: Uuid,
    #[serde(skip)]
    record: PhantomData<fn() -> R>,
}

pub type FoodTypeId = Id<FoodType>;
pub type FoodId = Id<Food>;
pub type CommentId = Id<Comment>;
pub type UserId = Id<User>;

impl<R> Id<R> {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            record: PhantomData,
        }
    }

    #[must_use]
    pub fn as_uuid(self) -> Uuid {
        self.uuid
    }
}

// Manual impls: derives would demand the same traits from `R`.

impl<R> Default for Id<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Id<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Id<R> {}

impl<R> PartialEq for Id<R> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<R> Eq for Id<R> {}

impl<R> PartialOrd for Id<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R> Ord for Id<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<R> Hash for Id<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<R> fmt::Debug for Id<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.uuid).finish()
    }
}

impl<R> fmt::Display for Id<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.uuid.fmt(f)
    }
}

impl<R> FromStr for Id<R> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}
