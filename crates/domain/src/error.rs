//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`FoodHubError`] via `#[from]` (or a manual `From` for boxed sources).

use std::collections::BTreeMap;

/// Top-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum FoodHubError {
    /// Submitted data broke a field rule.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The requester could not be identified.
    #[error("authentication failed")]
    Unauthenticated(#[from] AuthError),

    /// The requester is known but not allowed to perform the action.
    #[error("permission denied")]
    PermissionDenied,

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),

    /// Password hashing or token signing failed.
    #[error("credentials error")]
    Credentials(Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("this field is required")]
    Required { field: &'static str },

    #[error("this field may not be blank")]
    Blank { field: &'static str },

    #[error("ensure this field has no more than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("ensure this value is a finite number greater than or equal to 0")]
    NegativeOrInvalid { field: &'static str },

    /// A field held a value of the wrong type or shape.
    #[error("enter a valid value")]
    InvalidValue { field: String },

    #[error("the referenced food type does not exist")]
    UnknownFoodType,

    #[error("enter a valid username: letters, digits and @/./+/-/_ only")]
    InvalidUsername,

    #[error("a user with that username already exists")]
    UsernameTaken,

    #[error("enter a valid email address")]
    InvalidEmail,

    #[error("this password is too short, it must contain at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("password fields didn't match")]
    PasswordMismatch,

    /// The request body could not be decoded at all.
    #[error("{0}")]
    MalformedBody(String),

    /// More than one rule was broken.
    #[error("invalid input")]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Name of the wire field this error is reported under.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field }
            | Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::NegativeOrInvalid { field } => field,
            Self::InvalidValue { field } => field,
            Self::UnknownFoodType => "food_type",
            Self::InvalidUsername | Self::UsernameTaken => "username",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } | Self::PasswordMismatch => "password",
            Self::MalformedBody(_) | Self::Multiple(_) => "non_field_errors",
        }
    }

    /// Every message, grouped by the field it is reported under.
    #[must_use]
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for err in self.iter() {
            fields
                .entry(err.field().to_string())
                .or_default()
                .push(err.to_string());
        }
        fields
    }

    /// The single errors this one is made of.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        match self {
            Self::Multiple(errors) => errors.iter(),
            single => std::slice::from_ref(single).iter(),
        }
    }
}

/// Accumulates field errors so a payload is reported with every broken
/// rule at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    /// Record `field` as missing when `value` is `None`, and hand the value
    /// back.
    pub fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.0.push(ValidationError::Required { field });
        }
        value
    }

    /// Record the outcome of a rule.
    ///
    /// Errors on a field already reported as missing are dropped.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        let Err(err) = result else {
            return;
        };
        let errors = match err {
            ValidationError::Multiple(errors) => errors,
            single => vec![single],
        };
        for err in errors {
            if !self.is_missing(err.field()) {
                self.0.push(err);
            }
        }
    }

    fn is_missing(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|err| matches!(err, ValidationError::Required { field } if *field == name))
    }

    /// `Ok` when nothing was recorded, the lone error, or all of them.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`ValidationError`]s.
    pub fn finish(mut self) -> Result<(), ValidationError> {
        match self.0.len() {
            0 => Ok(()),
            1 => Err(self.0.remove(0)),
            _ => Err(ValidationError::Multiple(self.0)),
        }
    }
}

/// A lookup by id found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Reasons a requester could not be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authentication credentials were not provided")]
    NotAuthenticated,

    #[error("given token not valid for any token type")]
    InvalidToken,

    #[error("no active account found with the given credentials")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_field_name_for_each_validation_error() {
        assert_eq!(ValidationError::Blank { field: "name" }.field(), "name");
        assert_eq!(ValidationError::UnknownFoodType.field(), "food_type");
        assert_eq!(ValidationError::UsernameTaken.field(), "username");
        assert_eq!(ValidationError::PasswordMismatch.field(), "password");
        assert_eq!(
            ValidationError::MalformedBody("oops".to_string()).field(),
            "non_field_errors"
        );
        assert_eq!(
            ValidationError::InvalidValue {
                field: "price".to_string()
            }
            .field(),
            "price"
        );
    }

    #[test]
    fn should_return_lone_error_when_one_rule_broken() {
        let mut errors = FieldErrors::default();
        errors.check(Ok(()));
        errors.check(Err(ValidationError::InvalidEmail));

        assert_eq!(errors.finish(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn should_group_every_broken_rule_by_field() {
        let mut errors = FieldErrors::default();
        errors.check(Err(ValidationError::PasswordTooShort { min: 8 }));
        errors.check(Err(ValidationError::PasswordMismatch));
        errors.check(Err(ValidationError::InvalidEmail));

        let err = errors.finish().unwrap_err();
        let fields = err.by_field();

        assert_eq!(fields["password"].len(), 2);
        assert_eq!(fields["email"], vec!["enter a valid email address"]);
    }

    #[test]
    fn should_not_report_rules_on_missing_field() {
        let mut errors = FieldErrors::default();
        let name: Option<String> = errors.required("name", None);
        errors.check(Err(ValidationError::Blank { field: "name" }));

        assert!(name.is_none());
        assert_eq!(
            errors.finish(),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn should_be_ok_when_nothing_recorded() {
        let mut errors = FieldErrors::default();
        assert_eq!(errors.required("name", Some(1)), Some(1));
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn should_convert_typed_errors_into_foodhub_error() {
        let err: FoodHubError = ValidationError::InvalidEmail.into();
        assert!(matches!(
            err,
            FoodHubError::Validation(ValidationError::InvalidEmail)
        ));

        let err: FoodHubError = AuthError::InvalidToken.into();
        assert!(matches!(
            err,
            FoodHubError::Unauthenticated(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn should_format_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Food",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Food abc not found");
    }
}
