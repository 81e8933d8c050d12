//! Auth service: registration, token issuance and request authentication.

use foodhub_domain::error::{AuthError, FoodHubError, ValidationError};
use foodhub_domain::requester::Requester;
use foodhub_domain::user::{Credentials, Registration, User, validate_username};
use tokio::sync::OnceCell;

use crate::ports::{PasswordHasher, TokenIssuer, TokenPair, UserRepository};

/// Outcome of a successful sign-up.
#[derive(Debug, Clone)]
pub struct Registered {
    pub user: User,
    pub tokens: TokenPair,
}

/// Application service for accounts and bearer tokens.
pub struct AuthService<UR, PH, TI> {
    users: UR,
    hasher: PH,
    tokens: TI,
    /// Hash checked against when the username is unknown.
    decoy: OnceCell<String>,
}

const DECOY_PASSWORD: &str = "foodhub-decoy-password";

impl<UR, PH, TI> AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    /// Create a new service from its ports.
    pub fn new(users: UR, hasher: PH, tokens: TI) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy: OnceCell::new(),
        }
    }

    /// Create a regular account and issue its first token pair.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] when the form is invalid or the
    /// username is taken (no user is created), or a storage/credentials
    /// error from the ports.
    pub async fn register(&self, form: Registration) -> Result<Registered, FoodHubError> {
        let sign_up = form.validate()?;
        if self.users.get_by_username(&sign_up.username).await?.is_some() {
            return Err(ValidationError::UsernameTaken.into());
        }

        let password_hash = self.hasher.hash(sign_up.password).await?;
        let user = self
            .users
            .create(User::new(sign_up.username, sign_up.email, password_hash, false))
            .await?;
        let tokens = self.tokens.issue_pair(&user)?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(Registered { user, tokens })
    }

    /// Exchange a username and password for a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] when a field is missing, and
    /// [`AuthError::InvalidCredentials`] when the user does not exist or the
    /// password is wrong. An unknown username still costs one hash check.
    pub async fn obtain_pair(&self, credentials: Credentials) -> Result<TokenPair, FoodHubError> {
        let (username, password) = credentials.into_parts()?;
        let Some(user) = self.users.get_by_username(&username).await? else {
            let decoy = self
                .decoy
                .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD.to_string()))
                .await?;
            self.hasher.verify(password, decoy.clone()).await?;
            tracing::debug!(%username, "unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = self
            .hasher
            .verify(password, user.password_hash.clone())
            .await?;
        if !valid {
            tracing::debug!(username = %user.username, "password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.tokens.issue_pair(&user)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] when the token is not a
    /// valid refresh token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, FoodHubError> {
        self.tokens.refresh_access(refresh_token)
    }

    /// Resolve the requester behind an optional bearer token.
    ///
    /// No token means an anonymous requester. A token that does not verify,
    /// or whose user no longer exists, is an error rather than anonymity.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] for a bad token or a missing
    /// user, or a storage error from the repository.
    pub async fn authenticate(&self, bearer: Option<&str>) -> Result<Requester, FoodHubError> {
        let Some(token) = bearer else {
            return Ok(Requester::Anonymous);
        };
        let user_id = self.tokens.verify_access(token)?;
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(Requester::from(&user))
    }

    /// Make sure an administrator account named `username` exists.
    ///
    /// An existing account is returned as is; its password and role are not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Validation`] when `username` is invalid, or a
    /// storage/credentials error from the ports.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, FoodHubError> {
        if let Some(existing) = self.users.get_by_username(username).await? {
            if !existing.is_admin {
                tracing::warn!(username, "configured admin account exists without admin rights");
            }
            return Ok(existing);
        }

        validate_username(username)?;
        let password_hash = self.hasher.hash(password.to_string()).await?;
        let user = self
            .users
            .create(User::new(username, None, password_hash, true))
            .await?;
        tracing::info!(user_id = %user.id, username, "admin account created");
        Ok(user)
    }
}
