//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use greenhub_domain::error::{GreenhubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`GreenhubError`] to an HTTP response with appropriate status code.
pub struct ApiError(GreenhubError);

impl From<GreenhubError> for ApiError {
    fn from(err: GreenhubError) -> Self {
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
        let (status, message) = match &self.0 {
            GreenhubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            GreenhubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            GreenhubError::InvalidState(err) => (StatusCode::CONFLICT, err.to_string()),
            GreenhubError::Persistence(err) => {
                tracing::error!(error = %err, "persistence error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
