//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and the JSON error
//! envelope shared by every endpoint:
//!
//! ```json
//! { "statusCode": 404, "message": "...", "data": null, "success": false }
//! ```

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campuscare_core::errors::CareError;
use serde::Serialize;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `CareError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub CareError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CareError::NotFound(_) => StatusCode::NOT_FOUND,
            CareError::Validation(_) => StatusCode::BAD_REQUEST,
            // Duplicate shifts have always been reported as a bad request
            CareError::Conflict(_) => StatusCode::BAD_REQUEST,
            CareError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CareError::Authorization(_) => StatusCode::FORBIDDEN,
            CareError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CareError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Clients get the bare message; internal details stay in the logs
        let message = match self.0 {
            CareError::NotFound(message)
            | CareError::Validation(message)
            | CareError::Conflict(message)
            | CareError::Authentication(message)
            | CareError::Authorization(message) => {
                tracing::warn!("Request rejected ({}): {}", status, message);
                message
            }
            err @ (CareError::Database(_) | CareError::Internal(_)) => {
                tracing::error!("Request failed: {:?}", err);
                "Something went wrong while processing the request".to_string()
            }
        };

        let body = Json(json!({
            "statusCode": status.as_u16(),
            "message": message,
            "data": null,
            "success": false,
        }));

        (status, body).into_response()
    }
}

/// Automatic conversion from CareError to AppError
impl From<CareError> for AppError {
    fn from(err: CareError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Storage failures surface as `eyre::Report`, so they are wrapped in the
/// `CareError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CareError::Database(err))
    }
}

/// Malformed or non-JSON request bodies become validation errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(CareError::Validation(rejection.body_text()))
    }
}

/// `Json` extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// Maps a CareError to an HTTP response
pub fn map_error(err: CareError) -> Response {
    AppError(err).into_response()
}
