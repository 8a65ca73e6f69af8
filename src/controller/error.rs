//! Errors returned by the API controllers and their HTTP rendering.

use crate::catalog_store::{RepositoryError, ValidationError, ValidationErrors};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const UNAUTHORIZED_MESSAGE: &str = "You have to be logged in to modify data";
pub const INVALID_ARTIST_ID_MESSAGE: &str = "Invalid artist id.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Rendered as 500 with the field errors attached.
    #[error("{message}")]
    ValidationFailed {
        message: String,
        errors: ValidationErrors,
    },

    #[error("{0}")]
    PersistenceFailed(String),

    #[error("{0}")]
    NotFound(String),

    /// The request body could not be read as the expected entity.
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Internal,
}

impl ApiError {
    pub fn validation(errors: ValidationErrors) -> Self {
        ApiError::ValidationFailed {
            message: errors.to_string().trim_end().to_string(),
            errors,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed { .. }
            | ApiError::PersistenceFailed(_)
            | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Persistence(message) => ApiError::PersistenceFailed(message),
            RepositoryError::Unexpected(err) => {
                error!("Unexpected repository failure: {:#}", err);
                ApiError::Internal
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub message: String,
    pub status_code: u16,
    pub validation_errors: Vec<ValidationError>,
}

impl From<&ApiError> for ApiErrorBody {
    fn from(err: &ApiError) -> Self {
        let validation_errors = match err {
            ApiError::ValidationFailed { errors, .. } => errors.iter().cloned().collect(),
            _ => vec![],
        };
        ApiErrorBody {
            message: err.to_string(),
            status_code: err.status_code().as_u16(),
            validation_errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody::from(&self);
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound(INVALID_ARTIST_ID_MESSAGE.to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("Expected request with `Content-Type: application/json`".to_string())
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::validation(ValidationErrors::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::PersistenceFailed("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn repository_errors_map_to_api_errors() {
        let persistence: ApiError = RepositoryError::Persistence("Album not found".to_string()).into();
        assert!(matches!(&persistence, ApiError::PersistenceFailed(m) if m == "Album not found"));

        let unexpected: ApiError = RepositoryError::Unexpected(anyhow!("disk on fire")).into();
        assert!(matches!(unexpected, ApiError::Internal));
        // Internal details never reach the client
        assert!(!unexpected.to_string().contains("disk"));
    }

    #[test]
    fn body_carries_validation_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "Album title is required.");
        errors.add("artist", "An artist is required.");
        let err = ApiError::validation(errors);

        let body = serde_json::to_value(ApiErrorBody::from(&err)).unwrap();
        assert_eq!(body["statusCode"], 500);
        assert_eq!(
            body["message"],
            "Album title is required.\nAn artist is required."
        );
        assert_eq!(body["validationErrors"][0]["field"], "title");
        assert_eq!(body["validationErrors"][1]["message"], "An artist is required.");

        let body = serde_json::to_value(ApiErrorBody::from(&ApiError::Unauthorized)).unwrap();
        assert_eq!(body["message"], UNAUTHORIZED_MESSAGE);
        assert_eq!(body["statusCode"], 401);
        assert_eq!(body["validationErrors"], serde_json::json!([]));
    }
}
