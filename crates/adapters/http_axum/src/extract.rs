//! Request body extraction.
//!
//! Bodies are read as bytes by the extractor and decoded by the handler, so
//! a request refused by a permission check never has its payload inspected.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error::Segment;

use foodhub_domain::error::ValidationError;

use crate::error::ApiError;

/// A JSON request body, read up front and decoded on demand.
///
/// Extraction never fails: a wrong content type or an unreadable body is
/// kept and reported by [`JsonBody::decode`].
pub struct JsonBody(Result<Bytes, ValidationError>);

impl JsonBody {
    /// Decode the body into `T`.
    ///
    /// A value of the wrong type under a top-level key is reported against
    /// that key. Anything else is a malformed body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] or
    /// [`ValidationError::MalformedBody`].
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ValidationError> {
        decode(&self.0?)
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(Err(ValidationError::MalformedBody(
                "expected request with `Content-Type: application/json`".to_string(),
            ))));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()));
        Ok(Self(bytes))
    }
}

/// JSON body decoded straight away, for endpoints without a permission
/// check.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(body) = JsonBody::from_request(req, state).await;
        Ok(Self(body.decode()?))
    }
}

/// `application/json`, or any `application/*+json`.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ValidationError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let field = match err.path().iter().next() {
            Some(Segment::Map { key }) => Some(key.clone()),
            _ => None,
        };
        let err = err.into_inner();
        match (err.classify(), field) {
            (Category::Data, Some(field)) => ValidationError::InvalidValue { field },
            _ => ValidationError::MalformedBody(err.to_string()),
        }
    })?;
    de.end()
        .map_err(|err| ValidationError::MalformedBody(err.to_string()))?;
    Ok(value)
}
