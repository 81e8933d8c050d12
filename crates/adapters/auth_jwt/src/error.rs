//! Credentials-specific error type.

use foodhub_domain::error::FoodHubError;

/// Failures of the hashing or signing machinery itself.
///
/// A token that simply does not verify is not one of these: it surfaces as
/// [`FoodHubError::Unauthenticated`].
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token signing failed")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("blocking task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl From<CredentialsError> for FoodHubError {
    fn from(err: CredentialsError) -> Self {
        Self::Credentials(Box::new(err))
    }
}
