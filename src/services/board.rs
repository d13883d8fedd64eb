//! Scoreboard snapshots: both feeds fetched concurrently, then reconciled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::feeds::{LiveSource, OddsSource};
use crate::reconcile::{MergedEvent, ReconciliationEngine};

/// Reconciled board plus the time it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub updated_at: DateTime<Utc>,
    pub games: Vec<MergedEvent>,
}

/// Fetches both feeds and reconciles them on demand.
#[derive(Clone)]
pub struct BoardService {
    live: Arc<dyn LiveSource>,
    odds: Arc<dyn OddsSource>,
    engine: ReconciliationEngine,
}

impl BoardService {
    pub fn new(
        live: Arc<dyn LiveSource>,
        odds: Arc<dyn OddsSource>,
        engine: ReconciliationEngine,
    ) -> Self {
        Self { live, odds, engine }
    }

    /// Board for today (UTC).
    pub async fn current(&self) -> Result<Board> {
        self.snapshot(Utc::now().date_naive()).await
    }

    /// Board for `date`. Fails only if either feed cannot be obtained.
    pub async fn snapshot(&self, date: NaiveDate) -> Result<Board> {
        let (live, odds) =
            tokio::try_join!(self.live.fetch_live(date), self.odds.fetch_odds()).map_err(|e| {
                warn!("Feed retrieval failed for {}: {}", date, e);
                e
            })?;

        let games = self.engine.merge(&live, &odds);
        info!(
            "Board for {}: {} games ({} live, {} odds events)",
            date,
            games.len(),
            live.len(),
            odds.len()
        );

        Ok(Board {
            updated_at: Utc::now(),
            games,
        })
    }
}
