//! Merges the live-score feed with the odds feed into one record per event.
//!
//! The live feed is authoritative: output order and membership follow it, and
//! odds-only events are dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalize::normalize;
use super::odds::{OddsIndex, OddsQuote};
use super::raw::{RawLiveEvent, RawOddsEvent};
use super::score::{self, ScoreEstimate};

const DEFAULT_HOME_NAME: &str = "Home";
const DEFAULT_AWAY_NAME: &str = "Away";

/// One reconciled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEvent {
    pub id: String,
    pub home_name: String,
    pub away_name: String,
    pub score: Option<ScoreEstimate>,
    pub odds: OddsQuote,
}

/// How live events are matched to odds events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchingConfig {
    /// On an exact-key miss, accept the single odds pair whose full names
    /// end with the live feed's names (e.g. "Lakers" → "Los Angeles Lakers").
    #[serde(default = "default_nickname_fallback")]
    pub nickname_fallback: bool,
}

fn default_nickname_fallback() -> bool {
    true
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            nickname_fallback: default_nickname_fallback(),
        }
    }
}

/// Pure reconciliation over two already-fetched feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine {
    config: MatchingConfig,
}

impl ReconciliationEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> MatchingConfig {
        self.config
    }

    /// Produce one [`MergedEvent`] per live event, in live-feed order.
    pub fn merge(&self, live: &[RawLiveEvent], odds: &[RawOddsEvent]) -> Vec<MergedEvent> {
        let index = OddsIndex::build(odds);

        let merged: Vec<MergedEvent> = live
            .iter()
            .map(|event| self.merge_one(event, &index))
            .collect();

        debug!(
            live = live.len(),
            odds = odds.len(),
            indexed = index.len(),
            matched = merged.iter().filter(|m| !m.odds.is_unresolved()).count(),
            scored = merged.iter().filter(|m| m.score.is_some()).count(),
            estimated = merged
                .iter()
                .filter(|m| m.score.is_some_and(|s| s.estimated))
                .count(),
            "reconciliation pass complete"
        );

        merged
    }

    fn merge_one(&self, event: &RawLiveEvent, index: &OddsIndex) -> MergedEvent {
        let home_name = event.home_name().unwrap_or(DEFAULT_HOME_NAME).to_string();
        let away_name = event.away_name().unwrap_or(DEFAULT_AWAY_NAME).to_string();

        let odds = self.find_odds(index, &away_name, &home_name);

        // Direct totals are never overridden by an estimate
        let score = score::direct_totals(event).or_else(|| score::estimate(event));

        let id = match &event.id {
            Some(id) => id.to_string(),
            None => format!("{away_name}-{home_name}"),
        };

        MergedEvent {
            id,
            home_name,
            away_name,
            score,
            odds,
        }
    }

    fn find_odds(&self, index: &OddsIndex, away_name: &str, home_name: &str) -> OddsQuote {
        let away_key = normalize(Some(away_name));
        let home_key = normalize(Some(home_name));

        index
            .lookup(&away_key, &home_key)
            .or_else(|| {
                if self.config.nickname_fallback {
                    index.lookup_by_nickname(&away_key, &home_key)
                } else {
                    None
                }
            })
            .unwrap_or_else(OddsQuote::unresolved)
    }
}

/// Reconcile with the default matching policy.
pub fn merge(live: &[RawLiveEvent], odds: &[RawOddsEvent]) -> Vec<MergedEvent> {
    ReconciliationEngine::default().merge(live, odds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::raw::{parse_live_events, parse_odds_events};
    use serde_json::json;

    fn odds_feed() -> Vec<RawOddsEvent> {
        parse_odds_events(json!([{
            "home_team": "Los Angeles Lakers",
            "away_team": "Boston Celtics",
            "bookmakers": [{"markets": [{"outcomes": [
                {"name": "Los Angeles Lakers", "price": -150},
                {"name": "Boston Celtics", "price": 130}
            ]}]}]
        }]))
    }

    #[test]
    fn test_exact_match() {
        let live = parse_live_events(json!([{
            "id": "g1",
            "teams": {"home": {"name": "The Los Angeles Lakers"}, "away": {"name": "Boston Celtics"}}
        }]));
        let merged = merge(&live, &odds_feed());
        assert_eq!(merged[0].odds.home_moneyline, Some(-150.0));
        assert_eq!(merged[0].odds.away_moneyline, Some(130.0));
        assert_eq!(merged[0].score, None);
    }

    #[test]
    fn test_nickname_fallback_can_be_disabled() {
        let live = parse_live_events(json!([{
            "teams": {"home": {"name": "Lakers"}, "away": {"name": "Celtics"}}
        }]));

        let strict = ReconciliationEngine::new(MatchingConfig {
            nickname_fallback: false,
        });
        assert!(strict.merge(&live, &odds_feed())[0].odds.is_unresolved());

        let lenient = ReconciliationEngine::default();
        assert_eq!(
            lenient.merge(&live, &odds_feed())[0].odds.home_moneyline,
            Some(-150.0)
        );
    }

    #[test]
    fn test_missing_names_and_id_defaults() {
        let live = parse_live_events(json!([{}]));
        let merged = merge(&live, &odds_feed());
        assert_eq!(merged[0].home_name, "Home");
        assert_eq!(merged[0].away_name, "Away");
        assert_eq!(merged[0].id, "Away-Home");
        assert!(merged[0].odds.is_unresolved());
        assert!(merged[0].score.is_none());
    }

    #[test]
    fn test_synthesized_id_uses_feed_names() {
        let live = parse_live_events(json!([{
            "teams": {"home": {"name": "Lakers"}, "away": {"name": "Celtics"}}
        }]));
        assert_eq!(merge(&live, &[])[0].id, "Celtics-Lakers");
    }

    #[test]
    fn test_numeric_id_kept() {
        let live = parse_live_events(json!([{"id": 1234}]));
        assert_eq!(merge(&live, &[])[0].id, "1234");
    }

    #[test]
    fn test_odds_only_events_dropped() {
        let merged = merge(&[], &odds_feed());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let live = parse_live_events(json!([{"id": "g9"}]));
        let value = serde_json::to_value(merge(&live, &[])).expect("serialize");
        assert_eq!(
            value,
            json!([{
                "id": "g9",
                "homeName": "Home",
                "awayName": "Away",
                "score": null,
                "odds": {"homeMoneyline": null, "awayMoneyline": null}
            }])
        );
    }
}
