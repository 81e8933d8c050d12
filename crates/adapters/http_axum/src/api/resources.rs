//! JSON REST handlers shared by every catalogue resource.
//!
//! Bodies are decoded by the service only once the requester has been
//! allowed, so a refused request is answered with `401`/`403` whatever it
//! carries. The author of a new comment is always the requester; any author
//! in the request body is ignored.

use axum::Json;
use axum::extract::{FromRequestParts, Path, State};
use serde::Serialize;
use serde::de::DeserializeOwned;

use foodhub_domain::permission::Action;
use foodhub_domain::resource::Resource;

use super::{CreateResponse, DeleteResponse, ItemResponse, ListResponse, path_id};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::ResourceState;

/// `GET /api/<resource>`
pub async fn list<T, S>(
    State(state): State<S>,
    Auth(requester): Auth,
) -> Result<ListResponse<T>, ApiError>
where
    T: Resource + Serialize,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    let items = state.resource_service().list(&requester).await?;
    Ok(ListResponse::Ok(Json(items)))
}

/// `POST /api/<resource>`
pub async fn create<T, S>(
    State(state): State<S>,
    Auth(requester): Auth,
    body: JsonBody,
) -> Result<CreateResponse<T>, ApiError>
where
    T: Resource + Serialize,
    T::Draft: DeserializeOwned,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    let created = state
        .resource_service()
        .create(&requester, move || body.decode())
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/<resource>/{id}`
pub async fn retrieve<T, S>(
    State(state): State<S>,
    Auth(requester): Auth,
    Path(id): Path<String>,
) -> Result<ItemResponse<T>, ApiError>
where
    T: Resource + Serialize,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    let service = state.resource_service();
    let id = path_id(service, &requester, Action::Retrieve, &id)?;
    let item = service.retrieve(&requester, id).await?;
    Ok(ItemResponse::Ok(Json(item)))
}

/// `PATCH /api/<resource>/{id}`
pub async fn update<T, S>(
    State(state): State<S>,
    Auth(requester): Auth,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<ItemResponse<T>, ApiError>
where
    T: Resource + Serialize,
    T::Patch: DeserializeOwned,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    let service = state.resource_service();
    let id = path_id(service, &requester, Action::Update, &id)?;
    let item = service.update(&requester, id, move || body.decode()).await?;
    Ok(ItemResponse::Ok(Json(item)))
}

/// `DELETE /api/<resource>/{id}`
pub async fn delete<T, S>(
    State(state): State<S>,
    Auth(requester): Auth,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    T: Resource,
    S: ResourceState<T>,
    Auth: FromRequestParts<S>,
{
    let service = state.resource_service();
    let id = path_id(service, &requester, Action::Delete, &id)?;
    service.delete(&requester, id).await?;
    Ok(DeleteResponse::NoContent)
}
