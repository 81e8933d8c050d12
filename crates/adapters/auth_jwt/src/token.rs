//! HS256 JWT implementation of [`TokenIssuer`].

use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use foodhub_app::ports::{TokenIssuer, TokenPair};
use foodhub_domain::error::{AuthError, FoodHubError};
use foodhub_domain::id::UserId;
use foodhub_domain::time::{now, unix_seconds};
use foodhub_domain::user::User;

use crate::error::CredentialsError;

/// Default lifetime of an access token.
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(5 * 60);

/// Default lifetime of a refresh token.
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtConfig {
    /// Configuration with the default lifetimes.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }
}

/// Which half of a pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Payload carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenKind,
    pub user_id: String,
    pub iat: u64,
    pub exp: u64,
    /// Unique per token, so two tokens issued in the same second differ.
    pub jti: String,
}

/// Signs and verifies bearer tokens with a shared secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtTokenIssuer {
    /// Create an issuer from its configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    fn sign(&self, kind: TokenKind, user_id: &str) -> Result<String, FoodHubError> {
        let iat = unix_now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            token_type: kind,
            user_id: user_id.to_string(),
            iat,
            exp: iat.saturating_add(ttl.as_secs()),
            jti: uuid::Uuid::new_v4().simple().to_string(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| CredentialsError::Sign(err).into())
    }

    /// Decode `token` and check it is of the `expected` kind.
    fn open(&self, token: &str, expected: TokenKind) -> Result<Claims, FoodHubError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                tracing::debug!(error = %err, "token rejected");
                AuthError::InvalidToken
            })?;
        if data.claims.token_type != expected {
            tracing::debug!(kind = ?data.claims.token_type, "token of the wrong kind");
            return Err(AuthError::InvalidToken.into());
        }
        Ok(data.claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_pair(&self, user: &User) -> Result<TokenPair, FoodHubError> {
        let user_id = user.id.to_string();
        Ok(TokenPair {
            access: self.sign(TokenKind::Access, &user_id)?,
            refresh: self.sign(TokenKind::Refresh, &user_id)?,
        })
    }

    fn refresh_access(&self, refresh_token: &str) -> Result<String, FoodHubError> {
        let claims = self.open(refresh_token, TokenKind::Refresh)?;
        self.sign(TokenKind::Access, &claims.user_id)
    }

    fn verify_access(&self, access_token: &str) -> Result<UserId, FoodHubError> {
        let claims = self.open(access_token, TokenKind::Access)?;
        UserId::from_str(&claims.user_id).map_err(|_| AuthError::InvalidToken.into())
    }
}

fn unix_now() -> u64 {
    unix_seconds(now())
}
