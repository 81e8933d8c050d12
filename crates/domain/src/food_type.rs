//! Food type: a category that foods belong to (soup, dessert, drink, …).

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, FoodHubError};
use crate::id::FoodTypeId;
use crate::requester::Requester;
use crate::resource::{Resource, require_text};

/// Longest accepted food type name.
pub const NAME_MAX_LEN: usize = 255;

/// A category of food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodType {
    pub id: FoodTypeId,
    pub name: String,
}

/// Create payload for a [`FoodType`].
#[derive(Debug, Clone, Deserialize)]
pub struct FoodTypeDraft {
    #[serde(default)]
    pub name: Option<String>,
}

/// Partial-update payload for a [`FoodType`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodTypePatch {
    #[serde(default)]
    pub name: Option<String>,
}

impl FoodType {
    /// Create a validated food type with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] when `name` is blank or too long.
    pub fn new(name: impl Into<String>) -> Result<Self, FoodHubError> {
        let food_type = Self {
            id: FoodTypeId::new(),
            name: name.into(),
        };
        food_type.validate()?;
        Ok(food_type)
    }
}

impl Resource for FoodType {
    type Id = FoodTypeId;
    type Draft = FoodTypeDraft;
    type Patch = FoodTypePatch;

    const NAME: &'static str = "FoodType";

    fn id(&self) -> FoodTypeId {
        self.id
    }

    fn from_draft(draft: FoodTypeDraft, _requester: &Requester) -> Result<Self, FoodHubError> {
        let mut errors = FieldErrors::default();
        let name = errors.required("name", draft.name);
        errors.finish()?;
        Self::new(name.unwrap_or_default())
    }

    fn apply(&mut self, patch: FoodTypePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }

    fn validate(&self) -> Result<(), FoodHubError> {
        require_text("name", &self.name, Some(NAME_MAX_LEN))?;
        Ok(())
    }
}
