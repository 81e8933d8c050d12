//! Credential ports: password hashing and token issuance.

use std::future::Future;

use foodhub_domain::error::FoodHubError;
use foodhub_domain::id::UserId;
use foodhub_domain::user::User;

/// A signed access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// One-way password hashing.
///
/// Both operations are CPU-heavy, so implementations are expected to run
/// them off the async executor.
pub trait PasswordHasher {
    /// Hash a plain-text password.
    fn hash(&self, password: String) -> impl Future<Output = Result<String, FoodHubError>> + Send;

    /// Check a plain-text password against a stored hash.
    fn verify(
        &self,
        password: String,
        hash: String,
    ) -> impl Future<Output = Result<bool, FoodHubError>> + Send;
}

/// Issues and verifies bearer tokens.
pub trait TokenIssuer {
    /// Issue a fresh refresh token and its access token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Credentials`] when signing fails.
    fn issue_pair(&self, user: &User) -> Result<TokenPair, FoodHubError>;

    /// Issue a new access token from a valid refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] when the token is invalid,
    /// expired or not a refresh token.
    fn refresh_access(&self, refresh_token: &str) -> Result<String, FoodHubError>;

    /// Verify an access token and return the user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] when the token is invalid,
    /// expired or not an access token.
    fn verify_access(&self, access_token: &str) -> Result<UserId, FoodHubError>;
}
