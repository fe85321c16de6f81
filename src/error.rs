//! Error surface for the HTTP handlers.
//!
//! Business-rule rejections carry a stable message and render as 400 with
//! the `{success:false, message}` envelope. Everything unexpected funnels
//! into `Internal`, which logs and answers with a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected by a business rule (duplicate email, bad credentials).
    #[error("{0}")]
    Rejected(String),

    /// Insert hit a uniqueness constraint; message names the resource.
    #[error("{0}")]
    Duplicate(String),

    /// The credential verification step itself failed; the raw error is
    /// echoed in the body alongside the catalog message.
    #[error("{message}")]
    AuthFault { err: String, message: String },

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(message) | ApiError::Duplicate(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::AuthFault { err, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "err": err, "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Db(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Translates a storage-layer uniqueness violation into a duplicate-field
/// rejection naming the resource. Returns `None` for any other error so the
/// caller can fall through to the generic path.
pub fn duplicate_field(err: &sqlx::Error, resource: &str) -> Option<ApiError> {
    let db_err = err.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    let message = match db_err.constraint().and_then(constraint_field) {
        Some(field) => format!("{resource} already exists with this {field}"),
        None => format!("{resource} already exists"),
    };
    Some(ApiError::Duplicate(message))
}

/// Recovers the column name from Postgres constraint names shaped like
/// `users_email_key` or `users_email_idx`.
fn constraint_field(constraint: &str) -> Option<String> {
    let mut parts = constraint.split('_');
    let _table = parts.next()?;
    let field = parts.next()?;
    if field.is_empty() {
        return None;
    }
    Some(field.to_string())
}
