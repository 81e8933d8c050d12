//! bcrypt implementation of [`PasswordHasher`].

use std::future::Future;

use foodhub_app::ports::PasswordHasher;
use foodhub_domain::error::FoodHubError;

use crate::error::CredentialsError;

/// Hashes passwords with bcrypt on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with an explicit work factor.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: String) -> impl Future<Output = Result<String, FoodHubError>> + Send {
        let cost = self.cost;
        async move {
            let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
                .await
                .map_err(CredentialsError::from)?
                .map_err(CredentialsError::from)?;
            Ok(hash)
        }
    }

    fn verify(
        &self,
        password: String,
        hash: String,
    ) -> impl Future<Output = Result<bool, FoodHubError>> + Send {
        async move {
            let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
                .await
                .map_err(CredentialsError::from)?
                .map_err(CredentialsError::from)?;
            Ok(valid)
        }
    }
}
