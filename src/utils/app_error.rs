use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

/// Every failure a repository can report. Handlers turn these into responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        title: &'static str,
        message: String,
    },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{field}: {message}")]
    Conflict { field: &'static str, message: String },

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn required(field: &'static str) -> Self {
        Self::Validation {
            field,
            title: "is_required",
            message: "This field is required".to_string(),
        }
    }

    pub fn too_long(field: &'static str, max: usize) -> Self {
        Self::Validation {
            field,
            title: "too_long",
            message: format!("Must be at most {} characters", max),
        }
    }

    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    /// Maps a unique-index violation on `field` to `Conflict`; anything else stays a database error.
    pub fn from_write(err: DbErr, field: &'static str, value: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict {
                field,
                message: format!("'{}' is already taken", value),
            },
            _ => Self::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { field, title, message } => ResponseBuilder::fail_with_data(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed",
                vec![ValidationErrorDetail {
                    field: field.to_string(),
                    title: title.to_string(),
                    message,
                }],
            )
            .into_response(),
            Self::NotFound { resource, id } => ResponseBuilder::error(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("{} {} not found", resource, id),
            )
            .into_response(),
            Self::Conflict { field, message } => ResponseBuilder::fail_with_data(
                StatusCode::CONFLICT,
                "CONFLICT",
                &message,
                vec![ValidationErrorDetail {
                    field: field.to_string(),
                    title: "already_exists".to_string(),
                    message: message.clone(),
                }],
            )
            .into_response(),
            Self::Database(e) => {
                // Log the real cause, hand the client a generic message
                tracing::error!("Database error: {}", e);
                ResponseBuilder::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred",
                )
                .into_response()
            }
        }
    }
}
