// JSON response bodies and error-to-status mapping.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::directory::DirectoryError;
use crate::model::RequestError;

/// Success body of mutating endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match self {
            DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            DirectoryError::AlreadySignedUp { .. } | DirectoryError::NotRegistered { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        ErrorResponse::new(self.to_string()).into_response_with(status)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            RequestError::MissingQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RequestError::InvalidPath(_) | RequestError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };
        ErrorResponse::new(self.to_string()).into_response_with(status)
    }
}

impl From<PathRejection> for RequestError {
    fn from(rejection: PathRejection) -> Self {
        RequestError::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for RequestError {
    fn from(rejection: QueryRejection) -> Self {
        RequestError::InvalidQuery(rejection.body_text())
    }
}

/// Catch-all for paths no controller routes.
pub async fn not_found() -> Response {
    ErrorResponse::new("Not Found").into_response_with(StatusCode::NOT_FOUND)
}

/// Catch-all for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new("Method Not Allowed").into_response_with(StatusCode::METHOD_NOT_ALLOWED)
}
