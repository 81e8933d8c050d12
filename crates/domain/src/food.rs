//! Food: a priced catalogue item belonging to exactly one food type.

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, FoodHubError, ValidationError};
use crate::id::{FoodId, FoodTypeId};
use crate::requester::Requester;
use crate::resource::{Resource, require_text};
use crate::serde_ext::present;

/// Longest accepted food name.
pub const NAME_MAX_LEN: usize = 255;

/// A catalogue item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// The food type this food belongs to. Must reference an existing record.
    pub food_type: FoodTypeId,
}

/// Create payload for a [`Food`].
///
/// Every field but `description` is required; a missing one is reported by
/// [`Resource::from_draft`] rather than at decoding time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub food_type: Option<FoodTypeId>,
}

/// Partial-update payload for a [`Food`].
///
/// `description` distinguishes an absent field (keep) from an explicit
/// `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub food_type: Option<FoodTypeId>,
}

impl Food {
    /// Create a builder for constructing a [`Food`].
    #[must_use]
    pub fn builder() -> FoodBuilder {
        FoodBuilder::default()
    }

    fn check(&self, errors: &mut FieldErrors) {
        errors.check(require_text("name", &self.name, Some(NAME_MAX_LEN)));
        if !self.price.is_finite() || self.price < 0.0 {
            errors.check(Err(ValidationError::NegativeOrInvalid { field: "price" }));
        }
    }
}

impl Resource for Food {
    type Id = FoodId;
    type Draft = FoodDraft;
    type Patch = FoodPatch;

    const NAME: &'static str = "Food";

    fn id(&self) -> FoodId {
        self.id
    }

    fn from_draft(draft: FoodDraft, _requester: &Requester) -> Result<Self, FoodHubError> {
        FoodBuilder {
            id: None,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            food_type: draft.food_type,
        }
        .build()
    }

    fn apply(&mut self, patch: FoodPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(food_type) = patch.food_type {
            self.food_type = food_type;
        }
    }

    fn validate(&self) -> Result<(), FoodHubError> {
        let mut errors = FieldErrors::default();
        self.check(&mut errors);
        Ok(errors.finish()?)
    }
}

/// Step-by-step builder for [`Food`].
#[derive(Debug, Default)]
pub struct FoodBuilder {
    id: Option<FoodId>,
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    food_type: Option<FoodTypeId>,
}

impl FoodBuilder {
    #[must_use]
    pub fn id(mut self, id: FoodId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn food_type(mut self, food_type: FoodTypeId) -> Self {
        self.food_type = Some(food_type);
        self
    }

    /// Consume the builder, validate, and return a [`Food`].
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] naming every missing field
    /// (`name`, `price`, `food_type`) and every broken rule.
    pub fn build(self) -> Result<Food, FoodHubError> {
        let mut errors = FieldErrors::default();
        let name = errors.required("name", self.name);
        let price = errors.required("price", self.price);
        let food_type = errors.required("food_type", self.food_type);
        let food = Food {
            id: self.id.unwrap_or_default(),
            name: name.unwrap_or_default(),
            description: self.description,
            price: price.unwrap_or_default(),
            food_type: food_type.unwrap_or_default(),
        };
        food.check(&mut errors);
        errors.finish()?;
        Ok(food)
    }
}
