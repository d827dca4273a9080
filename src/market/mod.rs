use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use thiserror::Error;
use tracing::error;

use crate::error::ErrorBody;
use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod provider;
pub mod watchlist;

pub fn router() -> Router<AppState> {
    handlers::market_routes()
}

/// Failures from the market surface; same `{ message }` body as auth errors.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Already in watchlist")]
    AlreadyWatched,
    #[error("internal server error")]
    Provider(anyhow::Error),
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = match &self {
            MarketError::AlreadyWatched => StatusCode::CONFLICT,
            MarketError::Provider(e) => {
                error!(error = %e, "market provider failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
