//! JSON REST API handlers.

#[allow(clippy::missing_errors_doc)]
pub mod accounts;
#[allow(clippy::missing_errors_doc)]
pub mod resources;

use std::str::FromStr;

use axum::Json;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get, post};
use serde::Serialize;
use serde::de::DeserializeOwned;

use foodhub_app::ports::{PasswordHasher, Repository, TokenIssuer, UserRepository};
use foodhub_app::services::ResourceService;
use foodhub_domain::comment::Comment;
use foodhub_domain::error::NotFoundError;
use foodhub_domain::food::Food;
use foodhub_domain::food_type::FoodType;
use foodhub_domain::permission::{Action, Permission};
use foodhub_domain::requester::Requester;
use foodhub_domain::resource::Resource;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::state::{AppState, ResourceState};

/// Build the `/api` sub-router.
pub fn routes<FTR, FR, CR, UR, PH, TI>() -> Router<AppState<FTR, FR, CR, UR, PH, TI>>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    Router::new()
        .route("/foods", collection::<Food, _>())
        .route("/foods/{id}", detail::<Food, _>())
        .route("/food-types", collection::<FoodType, _>())
        .route("/food-types/{id}", detail::<FoodType, _>())
        .route("/comments", collection::<Comment, _>())
        .route("/comments/{id}", detail::<Comment, _>())
        // Accounts
        .route("/register", post(accounts::register::<FTR, FR, CR, UR, PH, TI>))
        .route("/token", post(accounts::obtain_pair::<FTR, FR, CR, UR, PH, TI>))
        .route("/token/refresh", post(accounts::refresh::<FTR, FR, CR, UR, PH, TI>))
}

/// `GET` and `POST` on a resource collection.
fn collection<T, S>() -> MethodRouter<S>
where
    T: Resource + Serialize,
    T::Draft: DeserializeOwned,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    get(resources::list::<T, S>).post(resources::create::<T, S>)
}

/// `GET`, `PATCH` and `DELETE` on a single record.
fn detail<T, S>() -> MethodRouter<S>
where
    T: Resource + Serialize,
    T::Patch: DeserializeOwned,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    get(resources::retrieve::<T, S>)
        .patch(resources::update::<T, S>)
        .delete(resources::delete::<T, S>)
}

/// Possible responses from a list endpoint.
pub enum ListResponse<T> {
    Ok(Json<Vec<T>>),
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a retrieve or update endpoint.
pub enum ItemResponse<T> {
    Ok(Json<T>),
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a create endpoint.
pub enum CreateResponse<T> {
    Created(Json<T>),
}

impl<T: Serialize> IntoResponse for CreateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from a delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Parse a path id for a detail endpoint.
///
/// A malformed id names no record, so it is reported as not-found, but only
/// once the requester has passed the collection-level permission check.
pub(crate) fn path_id<T, R, P>(
    service: &ResourceService<T, R, P>,
    requester: &Requester,
    action: Action,
    raw: &str,
) -> Result<T::Id, ApiError>
where
    T: Resource,
    R: Repository<T>,
    P: Permission<T>,
{
    T::Id::from_str(raw).map_err(|_| {
        let err = service.authorize(requester, action).err().unwrap_or_else(|| {
            NotFoundError {
                entity: T::NAME,
                id: raw.to_string(),
            }
            .into()
        });
        ApiError::from(err)
    })
}
