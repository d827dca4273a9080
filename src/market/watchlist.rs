use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::dto::WatchlistEntry;
use super::provider::MockMarket;
use super::MarketError;

/// Per-user watchlist views held in explicitly injected state.
///
/// Every user gets their own copy of the seed on first access; there is no
/// process-wide shared list. Races between a user's own tabs are
/// last-write-wins, which is fine at this scale.
pub struct WatchlistStore {
    seed: Vec<WatchlistEntry>,
    entries: RwLock<HashMap<Uuid, Vec<WatchlistEntry>>>,
}

impl WatchlistStore {
    pub fn new(seed: Vec<WatchlistEntry>) -> Self {
        Self {
            seed,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_default_entries() -> Self {
        Self::new(MockMarket::default_watchlist())
    }

    pub async fn list(&self, user_id: Uuid) -> Vec<WatchlistEntry> {
        let mut entries = self.entries.write().await;
        entries
            .entry(user_id)
            .or_insert_with(|| self.seed.clone())
            .clone()
    }

    /// Fails when the coin is already present for this user.
    pub async fn add(
        &self,
        user_id: Uuid,
        entry: WatchlistEntry,
    ) -> Result<WatchlistEntry, MarketError> {
        let mut entries = self.entries.write().await;
        let list = entries.entry(user_id).or_insert_with(|| self.seed.clone());
        if list.iter().any(|e| e.id == entry.id) {
            return Err(MarketError::AlreadyWatched);
        }
        list.push(entry.clone());
        Ok(entry)
    }

    /// Removes the coin if present; removing an absent coin is a no-op.
    pub async fn remove(&self, user_id: Uuid, coin_id: &str) {
        let mut entries = self.entries.write().await;
        let list = entries.entry(user_id).or_insert_with(|| self.seed.clone());
        list.retain(|e| e.id != coin_id);
    }
}
