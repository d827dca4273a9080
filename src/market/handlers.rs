use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use super::dto::{ChartPoint, Coin, PortfolioSnapshot, RemovedEntry, WatchlistEntry};
use super::MarketError;
use crate::auth::jwt::AuthPrincipal;
use crate::state::AppState;

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/market/coins", get(list_coins))
        .route("/market/coins/:id/chart", get(coin_chart))
        .route("/market/portfolio", get(portfolio))
        .route("/market/watchlist", get(watchlist).post(watch))
        .route("/market/watchlist/:id", delete(unwatch))
}

#[instrument(skip(state, principal), fields(user_id = %principal.user_id))]
pub async fn list_coins(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> Result<Json<Vec<Coin>>, MarketError> {
    let coins = state.market.coins().await.map_err(MarketError::Provider)?;
    Ok(Json(coins))
}

#[instrument(skip(state, principal), fields(user_id = %principal.user_id))]
pub async fn coin_chart(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChartPoint>>, MarketError> {
    let points = state.market.chart(&id).await.map_err(MarketError::Provider)?;
    Ok(Json(points))
}

#[instrument(skip(state, principal), fields(user_id = %principal.user_id))]
pub async fn portfolio(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> Result<Json<PortfolioSnapshot>, MarketError> {
    let snapshot = state
        .market
        .portfolio()
        .await
        .map_err(MarketError::Provider)?;
    Ok(Json(snapshot))
}

#[instrument(skip(state, principal), fields(user_id = %principal.user_id))]
pub async fn watchlist(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> Json<Vec<WatchlistEntry>> {
    Json(state.watchlist.list(principal.user_id).await)
}

#[instrument(skip(state, principal, entry), fields(user_id = %principal.user_id))]
pub async fn watch(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Json(entry): Json<WatchlistEntry>,
) -> Result<(StatusCode, Json<WatchlistEntry>), MarketError> {
    let added = state.watchlist.add(principal.user_id, entry).await?;
    Ok((StatusCode::CREATED, Json(added)))
}

#[instrument(skip(state, principal), fields(user_id = %principal.user_id))]
pub async fn unwatch(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path(id): Path<String>,
) -> Json<RemovedEntry> {
    state.watchlist.remove(principal.user_id, &id).await;
    Json(RemovedEntry { id })
}
