//! User: an account that can authenticate and author comments.

use serde::Deserialize;

use crate::error::{FieldErrors, FoodHubError, ValidationError};
use crate::id::UserId;
use crate::time::{Timestamp, now};

/// Longest accepted username.
pub const USERNAME_MAX_LEN: usize = 150;

/// Shortest accepted password.
pub const PASSWORD_MIN_LEN: usize = 8;

/// A registered account.
///
/// Never serialized: the password hash must not leave the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
    pub date_joined: Timestamp,
}

impl User {
    /// Create a new account record around an already-hashed password.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email,
            password_hash: password_hash.into(),
            is_admin,
            date_joined: now(),
        }
    }
}

/// Sign-up form, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Confirmation of `password`.
    #[serde(default, alias = "password_confirmation")]
    pub password2: Option<String>,
}

/// A sign-up form that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

impl Registration {
    /// Check every rule that does not need the store.
    ///
    /// Username uniqueness is checked by the registration use-case.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] listing every missing field and
    /// broken rule.
    pub fn validate(self) -> Result<SignUp, FoodHubError> {
        let mut errors = FieldErrors::default();
        let username = errors.required("username", self.username);
        let password = errors.required("password", self.password);
        let password2 = errors.required("password2", self.password2);

        if let Some(username) = &username {
            errors.check(validate_username(username));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            errors.check(validate_email(email));
        }
        if let Some(password) = &password {
            if password.chars().count() < PASSWORD_MIN_LEN {
                errors.check(Err(ValidationError::PasswordTooShort {
                    min: PASSWORD_MIN_LEN,
                }));
            }
            if password2.as_ref().is_some_and(|confirmation| confirmation != password) {
                errors.check(Err(ValidationError::PasswordMismatch));
            }
        }
        errors.finish()?;

        Ok(SignUp {
            username: username.unwrap_or_default(),
            email: self.email,
            password: password.unwrap_or_default(),
        })
    }
}

/// Username/password pair presented to obtain tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Both halves of the pair, once each is known to be present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the missing fields.
    pub fn into_parts(self) -> Result<(String, String), ValidationError> {
        let mut errors = FieldErrors::default();
        let username = errors.required("username", self.username);
        let password = errors.required("password", self.password);
        errors.finish()?;
        Ok((username.unwrap_or_default(), password.unwrap_or_default()))
    }
}

/// Check the username rules: not blank, bounded length, and only letters,
/// digits and `@ . + - _`.
///
/// # Errors
///
/// Returns the broken [`ValidationError`].
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Blank { field: "username" });
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: "username",
            max: USERNAME_MAX_LEN,
        });
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !username.chars().all(allowed) {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if valid && !email.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}
