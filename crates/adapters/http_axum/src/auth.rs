//! Bearer token authentication.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use foodhub_app::ports::{PasswordHasher, Repository, TokenIssuer, UserRepository};
use foodhub_domain::comment::Comment;
use foodhub_domain::error::{AuthError, FoodHubError};
use foodhub_domain::food::Food;
use foodhub_domain::food_type::FoodType;
use foodhub_domain::requester::Requester;

use crate::error::ApiError;
use crate::state::AppState;

const BEARER: &str = "Bearer";

/// The requester behind the current request.
///
/// No `Authorization` header, or one with another scheme, yields
/// [`Requester::Anonymous`]. A bearer token that does not verify rejects the
/// request with `401` whatever the endpoint.
pub struct Auth(pub Requester);

impl<FTR, FR, CR, UR, PH, TI> FromRequestParts<AppState<FTR, FR, CR, UR, PH, TI>> for Auth
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<FTR, FR, CR, UR, PH, TI>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let requester = state.auth_service.authenticate(token.as_deref()).await?;
        Ok(Self(requester))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, FoodHubError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    let mut parts = value.split_whitespace();
    if parts.next() != Some(BEARER) {
        return Ok(None);
    }
    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(Some(token.to_string())),
        _ => Err(AuthError::InvalidToken.into()),
    }
}
