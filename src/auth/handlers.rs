use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest};
use crate::auth::jwt::AuthPrincipal;
use crate::auth::service;
use crate::error::AuthError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let (user, token) = service::signup(&state, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let (user, token) = service::login(&state, &payload.email, &payload.password).await?;
    Ok(Json(AuthResponse { user, token }))
}

/// Returns the principal encoded in the presented token. Pure decode: the
/// store is not consulted, so identity freshness is bounded by the TTL.
#[instrument(skip_all)]
pub async fn me(principal: AuthPrincipal) -> Json<PublicUser> {
    Json(PublicUser {
        id: principal.user_id,
        email: principal.email,
    })
}
