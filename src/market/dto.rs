use serde::{Deserialize, Serialize};

/// A market listing row, as the dashboard renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub market_cap: f64,
    pub volume: f64,
}

/// A coin pinned to a user's watchlist (the listing-row subset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
}

#[derive(Debug, Serialize)]
pub struct RemovedEntry {
    pub id: String,
}

/// One point of a mock price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub change_24h: f64,
    pub assets: Vec<PortfolioAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAsset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub amount: f64,
    pub value: f64,
}
