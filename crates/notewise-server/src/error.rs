//! HTTP error types for the Notewise server.
//!
//! Maps domain errors from `notewise-core` and `notewise-storage` into
//! HTTP responses. Every variant produces a JSON body with a
//! machine-readable `error` field and a human-readable `message`; quota
//! rejections additionally carry the limit that was reached so clients
//! can distinguish them from a generic forbidden.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use notewise_core::AuthError;
use notewise_storage::StoreError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Client sent invalid input (missing or empty required fields).
    BadRequest(String),
    /// Authentication failed: bad credentials or missing/invalid token.
    Unauthorized(String),
    /// Authenticated but insufficient role or wrong tenant.
    Forbidden(String),
    /// Subscription-tier quota reached.
    QuotaExceeded { limit: i64 },
    /// Requested resource not found (including cross-tenant access
    /// disguised as not-found).
    NotFound(String),
    /// Internal server error. Logged; the client sees a generic message.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<i64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, limit) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg, None),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            Self::QuotaExceeded { limit } => (
                StatusCode::FORBIDDEN,
                "quota_exceeded",
                format!("note limit reached: free tier allows {limit} notes — upgrade to Pro for unlimited notes"),
                Some(limit),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_owned(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
            limit,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized("invalid credentials".to_owned()),
            AuthError::TokenInvalid { .. } | AuthError::TokenExpired => {
                Self::Unauthorized("invalid or expired token".to_owned())
            }
            AuthError::InsufficientRole { .. } | AuthError::CrossTenant => {
                Self::Forbidden(err.to_string())
            }
            AuthError::QuotaExceeded { limit } => Self::QuotaExceeded { limit },
            AuthError::Hash { .. } => Self::Internal(err.to_string()),
            AuthError::Store(inner) => inner.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            // Conflicts can only arise from store-level races the API never
            // exposes; the client error surface stays at 400/401/403/404/500.
            StoreError::Conflict { .. } | StoreError::Backend { .. } => {
                Self::Internal(err.to_string())
            }
        }
    }
}
