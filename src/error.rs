use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Wire shape of every error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Failures the session service surfaces to callers.
///
/// Unknown email and wrong password both map to `InvalidCredentials` so the
/// caller cannot enumerate registered emails. Internal store/hasher/codec
/// failures are folded into `StoreUnavailable`; the cause is logged
/// server-side and never returned.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("email already registered")]
    DuplicateIdentity,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("internal server error")]
    StoreUnavailable(anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateIdentity => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(e) => {
                error!(error = %e, "internal failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failure_message_is_generic() {
        let err = AuthError::StoreUnavailable(anyhow::anyhow!("connection refused to 10.0.0.7"));
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn credential_errors_share_one_message() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }
}
