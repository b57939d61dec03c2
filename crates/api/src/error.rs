use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qrtickets_core::error::CoreError;

use crate::render;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce HTML error pages with a matching
/// status code. Internal details are logged, never rendered.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `qrtickets_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    render::not_found_page(&format!("{entity} {id}")),
                )
                    .into_response(),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, render::edit_page(&msg)).into_response()
                }
                CoreError::Decode(err) => {
                    (StatusCode::BAD_REQUEST, render::edit_page(&err.to_string())).into_response()
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error_response()
                }
            },

            // --- Database errors ---
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                render::not_found_page("Resource"),
            )
                .into_response(),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error_response()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, render::edit_page(&msg)).into_response()
            }
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, render::edit_page(&msg)).into_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, render::error_page()).into_response()
}

impl From<MultipartError> for AppError {
    /// Oversized uploads (rejected by `DefaultBodyLimit` while the form is
    /// streamed) keep their 413; every other framing problem is a 400.
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(
                "The upload is larger than this server accepts".to_string(),
            )
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}
