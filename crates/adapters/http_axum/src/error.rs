//! HTTP error response mapping.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use foodhub_domain::error::{FoodHubError, ValidationError};

/// Challenge sent with every `401`.
const BEARER_CHALLENGE: &str = r#"Bearer realm="api""#;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }

    fn validation(err: &ValidationError) -> Self {
        Self {
            error: err.to_string(),
            fields: Some(err.by_field()),
        }
    }
}

/// Maps [`FoodHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(FoodHubError);

impl From<FoodHubError> for ApiError {
    fn from(err: FoodHubError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            FoodHubError::Validation(err) => (StatusCode::BAD_REQUEST, ErrorBody::validation(err)),
            FoodHubError::NotFound(err) => {
                (StatusCode::NOT_FOUND, ErrorBody::message(err.to_string()))
            }
            FoodHubError::Unauthenticated(err) => {
                let mut response =
                    (StatusCode::UNAUTHORIZED, Json(ErrorBody::message(err.to_string())))
                        .into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(BEARER_CHALLENGE),
                );
                return response;
            }
            FoodHubError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody::message("you do not have permission to perform this action"),
            ),
            FoodHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error"),
                )
            }
            FoodHubError::Credentials(err) => {
                tracing::error!(error = %err, "credentials error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
