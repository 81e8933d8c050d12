//! JSON REST handlers for sign-up and bearer tokens.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use foodhub_app::ports::{PasswordHasher, Repository, TokenIssuer, UserRepository};
use foodhub_domain::comment::Comment;
use foodhub_domain::error::ValidationError;
use foodhub_domain::food::Food;
use foodhub_domain::food_type::FoodType;
use foodhub_domain::user::{Credentials, Registration};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Body returned by a successful sign-up.
#[derive(Debug, Serialize)]
pub struct RegisteredBody {
    pub message: &'static str,
    pub access_token: String,
    pub refresh_token: String,
}

/// Body returned by the token endpoint.
#[derive(Debug, Serialize)]
pub struct TokenPairBody {
    pub access: String,
    pub refresh: String,
}

/// Request body for refreshing an access token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Body returned by the refresh endpoint.
#[derive(Debug, Serialize)]
pub struct AccessBody {
    pub access: String,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Ok(Json<RegisteredBody>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the token endpoints.
pub enum TokenResponse<B> {
    Ok(Json<B>),
}

impl<B: Serialize> IntoResponse for TokenResponse<B> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/register`
pub async fn register<FTR, FR, CR, UR, PH, TI>(
    State(state): State<AppState<FTR, FR, CR, UR, PH, TI>>,
    ApiJson(form): ApiJson<Registration>,
) -> Result<RegisterResponse, ApiError>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    let registered = state.auth_service.register(form).await?;
    Ok(RegisterResponse::Ok(Json(RegisteredBody {
        message: "User created successfully",
        access_token: registered.tokens.access,
        refresh_token: registered.tokens.refresh,
    })))
}

/// `POST /api/token`
pub async fn obtain_pair<FTR, FR, CR, UR, PH, TI>(
    State(state): State<AppState<FTR, FR, CR, UR, PH, TI>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<TokenResponse<TokenPairBody>, ApiError>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    let pair = state.auth_service.obtain_pair(credentials).await?;
    Ok(TokenResponse::Ok(Json(TokenPairBody {
        access: pair.access,
        refresh: pair.refresh,
    })))
}

/// `POST /api/token/refresh`
pub async fn refresh<FTR, FR, CR, UR, PH, TI>(
    State(state): State<AppState<FTR, FR, CR, UR, PH, TI>>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<TokenResponse<AccessBody>, ApiError>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    let refresh = req
        .refresh
        .ok_or(ValidationError::Required { field: "refresh" })?;
    let access = state.auth_service.refresh(&refresh)?;
    Ok(TokenResponse::Ok(Json(AccessBody { access })))
}
