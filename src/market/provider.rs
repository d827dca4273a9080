use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::dto::{ChartPoint, Coin, PortfolioAsset, PortfolioSnapshot, WatchlistEntry};

/// Read-only market data source with a fixed query interface. Handlers only
/// ever see this trait; swapping in a real feed is a state-wiring change.
#[async_trait]
pub trait MarketProvider: Send + Sync {
    async fn coins(&self) -> anyhow::Result<Vec<Coin>>;
    async fn chart(&self, coin_id: &str) -> anyhow::Result<Vec<ChartPoint>>;
    async fn portfolio(&self) -> anyhow::Result<PortfolioSnapshot>;
}

/// Hard-coded demo dataset served behind simulated latency.
pub struct MockMarket {
    latency: Duration,
}

impl MockMarket {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(400),
        }
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// The two entries every fresh watchlist view starts with.
    pub fn default_watchlist() -> Vec<WatchlistEntry> {
        vec![
            WatchlistEntry {
                id: "bitcoin".into(),
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                price: 68_000.50,
                change_24h: 2.5,
            },
            WatchlistEntry {
                id: "ethereum".into(),
                name: "Ethereum".into(),
                symbol: "ETH".into(),
                price: 3_400.75,
                change_24h: -1.2,
            },
        ]
    }
}

impl Default for MockMarket {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketProvider for MockMarket {
    async fn coins(&self) -> anyhow::Result<Vec<Coin>> {
        tokio::time::sleep(self.latency).await;
        Ok(vec![
            Coin {
                id: "bitcoin".into(),
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                price: 68_000.50,
                change_24h: 2.5,
                market_cap: 1300e9,
                volume: 40e9,
            },
            Coin {
                id: "ethereum".into(),
                name: "Ethereum".into(),
                symbol: "ETH".into(),
                price: 3_400.75,
                change_24h: -1.2,
                market_cap: 400e9,
                volume: 20e9,
            },
            Coin {
                id: "solana".into(),
                name: "Solana".into(),
                symbol: "SOL".into(),
                price: 170.20,
                change_24h: 5.1,
                market_cap: 75e9,
                volume: 5e9,
            },
            Coin {
                id: "dogecoin".into(),
                name: "Dogecoin".into(),
                symbol: "DOGE".into(),
                price: 0.16,
                change_24h: 0.5,
                market_cap: 22e9,
                volume: 2e9,
            },
            Coin {
                id: "cardano".into(),
                name: "Cardano".into(),
                symbol: "ADA".into(),
                price: 0.45,
                change_24h: -2.0,
                market_cap: 16e9,
                volume: 1e9,
            },
            Coin {
                id: "avalanche".into(),
                name: "Avalanche".into(),
                symbol: "AVAX".into(),
                price: 35.80,
                change_24h: 1.8,
                market_cap: 14e9,
                volume: 1.2e9,
            },
        ])
    }

    async fn chart(&self, coin_id: &str) -> anyhow::Result<Vec<ChartPoint>> {
        tokio::time::sleep(self.latency).await;

        // Unknown ids fall back to the generic base price.
        let base = match coin_id {
            "bitcoin" => 68_000.0,
            "ethereum" => 3_400.0,
            _ => 170.0,
        };

        let mut rng = rand::thread_rng();
        let points = [
            ("7d ago", 100.0),
            ("6d ago", 110.0),
            ("5d ago", 105.0),
            ("4d ago", 120.0),
            ("3d ago", 130.0),
            ("2d ago", 125.0),
            ("Yesterday", 140.0),
            ("Today", 135.0),
        ]
        .into_iter()
        .map(|(name, offset)| ChartPoint {
            name: name.to_string(),
            price: (rng.gen_range(0.0..100.0) + offset) / 150.0 * base,
        })
        .collect();
        Ok(points)
    }

    async fn portfolio(&self) -> anyhow::Result<PortfolioSnapshot> {
        tokio::time::sleep(self.latency).await;
        Ok(PortfolioSnapshot {
            total_value: 12_540.75,
            change_24h: 120.50,
            assets: vec![
                PortfolioAsset {
                    id: "bitcoin".into(),
                    name: "Bitcoin".into(),
                    symbol: "BTC".into(),
                    amount: 0.15,
                    value: 10_200.07,
                },
                PortfolioAsset {
                    id: "ethereum".into(),
                    name: "Ethereum".into(),
                    symbol: "ETH".into(),
                    amount: 0.5,
                    value: 1_700.37,
                },
                PortfolioAsset {
                    id: "solana".into(),
                    name: "Solana".into(),
                    symbol: "SOL".into(),
                    amount: 3.0,
                    value: 510.60,
                },
                PortfolioAsset {
                    id: "dogecoin".into(),
                    name: "Dogecoin".into(),
                    symbol: "DOGE".into(),
                    amount: 800.0,
                    value: 128.00,
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn coins_returns_the_full_listing() {
        let market = MockMarket::instant();
        let coins = market.coins().await.expect("coins");
        assert_eq!(coins.len(), 6);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[0].price, 68_000.50);
    }

    #[tokio::test]
    async fn chart_scales_to_the_coin_base_price() {
        let market = MockMarket::instant();

        let btc = market.chart("bitcoin").await.expect("chart");
        assert_eq!(btc.len(), 8);
        assert_eq!(btc[0].name, "7d ago");
        assert_eq!(btc[7].name, "Today");
        // Offsets span 100..=140 with up to 100 of jitter.
        for point in &btc {
            assert!(point.price >= 100.0 / 150.0 * 68_000.0);
            assert!(point.price <= 240.0 / 150.0 * 68_000.0);
        }

        let other = market.chart("no-such-coin").await.expect("chart");
        assert!(other.iter().all(|p| p.price <= 240.0 / 150.0 * 170.0));
    }

    #[tokio::test]
    async fn portfolio_totals_match_the_fixture() {
        let market = MockMarket::instant();
        let snapshot = market.portfolio().await.expect("portfolio");
        assert_eq!(snapshot.total_value, 12_540.75);
        assert_eq!(snapshot.assets.len(), 4);
    }
}
