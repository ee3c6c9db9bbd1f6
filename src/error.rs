use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::{ApiResponse, Meta},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Request timed out")]
    Timeout,

    /// A bare status produced outside the handlers: body limit, unsupported
    /// method, request timeout.
    #[error("{}", .0.canonical_reason().unwrap_or("Request failed"))]
    Status(StatusCode),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("Persistence error")]
    Persistence(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(entity) => AppError::NotFound(entity.to_string()),
            StoreError::Timeout(_) => AppError::Timeout,
            StoreError::Database(e) => AppError::DbError(e),
            StoreError::Constraint(msg) | StoreError::Password(msg) => AppError::Persistence(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Status(status) => *status,
            AppError::Timeout
            | AppError::DbError(_)
            | AppError::Persistence(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::DbError(e) => tracing::error!(error = %e, "database error"),
            AppError::Persistence(msg) => tracing::error!(error = %msg, "persistence error"),
            AppError::Internal(e) => tracing::error!(error = %e, "internal error"),
            AppError::Timeout => tracing::error!("storage timeout"),
            AppError::NotFound(_) | AppError::BadRequest(_) | AppError::Status(_) => {}
        }

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn store_errors_map_to_http_statuses() {
        let cases = [
            (StoreError::NotFound("product"), StatusCode::NOT_FOUND),
            (
                StoreError::Timeout(Duration::from_secs(5)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Constraint("fk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (store_err, expected) in cases {
            assert_eq!(AppError::from(store_err).status(), expected);
        }
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = AppError::from(StoreError::NotFound("product"));
        assert_eq!(err.to_string(), "product not found");
    }

    #[test]
    fn bare_status_keeps_its_code_and_reason() {
        let err = AppError::Status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "Payload Too Large");
    }

    #[test]
    fn persistence_details_are_not_in_the_message() {
        let err = AppError::from(StoreError::Constraint("users_email_key".into()));
        assert_eq!(err.to_string(), "Persistence error");
    }
}
