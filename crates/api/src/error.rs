use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fbfp_core::error::CoreError;
use serde::Serialize;

/// Error type returned by every handler and extractor.
///
/// Domain failures arrive as [`CoreError`]; the remaining variants cover
/// what only the HTTP layer can go wrong with. Whatever the source, the
/// client receives the same `{ "error", "code" }` document.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Undecodable form or multipart body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Path matched no route.
    #[error("No route for {0}")]
    NoRoute(String),

    /// Path exists but not for this method.
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    RequestTimeout,

    /// Unexpected failure; the detail is logged, never shown.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

const SANITIZED: &str = "An internal error occurred";

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        SANITIZED.to_string(),
    )
}

impl AppError {
    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NoRoute(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
            AppError::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                format!("Method {method} not allowed for {path}"),
            ),
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "The request took too long to complete.".to_string(),
            ),
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                internal()
            }
        }
    }
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    let (status, code) = match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        CoreError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
        CoreError::InsufficientStorage(msg) => {
            tracing::warn!(error = %msg, "Rejecting upload, disk nearly full");
            (StatusCode::INTERNAL_SERVER_ERROR, "INSUFFICIENT_STORAGE")
        }
        CoreError::NotImplemented(_) => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
        CoreError::Internal(detail) => {
            tracing::error!(error = %detail, "Domain invariant broken");
            return internal();
        }
    };
    let message = match err {
        CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
        CoreError::Validation(msg)
        | CoreError::Unauthorized(msg)
        | CoreError::Forbidden(msg)
        | CoreError::Conflict(msg)
        | CoreError::PayloadTooLarge(msg)
        | CoreError::InsufficientStorage(msg)
        | CoreError::NotImplemented(msg)
        | CoreError::Internal(msg) => msg.clone(),
    };
    (status, code, message)
}

/// Map a sqlx failure onto the error document.
///
/// A missing row is a 404 and a violated `uq_*` constraint (SQLSTATE 23505)
/// a 409; anything else is logged and reported as a bare 500.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let unique_violation = db_err.code().as_deref() == Some("23505");
        match db_err.constraint() {
            Some("uq_users_email") if unique_violation => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "That email address already belongs to another account.".to_string(),
                );
            }
            Some(constraint) if unique_violation && constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Value already taken ({constraint})"),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}
