//! Typed "raw" views of the two upstream feeds.
//!
//! Neither provider guarantees its shape, so every field is optional and a
//! malformed value deserializes to `None` (or an empty default) rather than
//! failing the whole record. Callers must handle absence at each access site.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Lenient field helpers
// =============================================================================

/// Deserialize any JSON value, keeping it only if it fits `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Deserialize a list, replacing malformed entries with `T::default()` so
/// positions are preserved. Anything that is not an array becomes empty.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// Deserialize an object into a map, replacing malformed values with
/// `T::default()`. Anything that is not an object becomes `None`.
fn lenient_map<'de, D, T>(deserializer: D) -> Result<Option<BTreeMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(entries) => Some(
            entries
                .into_iter()
                .map(|(k, v)| (k, T::deserialize(v).unwrap_or_default()))
                .collect(),
        ),
        _ => None,
    })
}

/// A finite JSON number, if the value is one.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

// =============================================================================
// Live feed
// =============================================================================

/// Event identifier as providers send it: a string or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventId::Text(s) => f.write_str(s),
            EventId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One live-score event, as loosely as the provider sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLiveEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<EventId>,
    #[serde(default, deserialize_with = "lenient")]
    pub teams: Option<RawTeams>,
    #[serde(default, deserialize_with = "lenient")]
    pub scores: Option<RawScores>,
    /// Period identifier (e.g. `q1`, `ot`) to partial scores.
    #[serde(default, deserialize_with = "lenient_map")]
    pub periods: Option<BTreeMap<String, RawPeriod>>,
    #[serde(default, deserialize_with = "lenient")]
    pub statistics: Option<RawStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeams {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<RawTeam>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<RawTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeam {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScores {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<RawSideScore>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<RawSideScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSideScore {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPeriod {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatistics {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<RawTeamStats>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<RawTeamStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeamStats {
    #[serde(default, deserialize_with = "lenient")]
    pub points: Option<f64>,
}

impl RawLiveEvent {
    /// Parse one feed entry. Entries that are not objects yield an empty event.
    pub fn from_value(value: Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn home_name(&self) -> Option<&str> {
        self.teams.as_ref()?.home.as_ref()?.name.as_deref()
    }

    pub fn away_name(&self) -> Option<&str> {
        self.teams.as_ref()?.away.as_ref()?.name.as_deref()
    }

    pub fn home_total(&self) -> Option<f64> {
        finite(self.scores.as_ref()?.home.as_ref()?.total)
    }

    pub fn away_total(&self) -> Option<f64> {
        finite(self.scores.as_ref()?.away.as_ref()?.total)
    }

    pub fn home_points(&self) -> Option<f64> {
        finite(self.statistics.as_ref()?.home.as_ref()?.points)
    }

    pub fn away_points(&self) -> Option<f64> {
        finite(self.statistics.as_ref()?.away.as_ref()?.points)
    }
}

// =============================================================================
// Odds feed
// =============================================================================

/// One odds event with nested bookmaker/market/outcome lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOddsEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub home_team: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub bookmakers: Vec<RawBookmaker>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBookmaker {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub markets: Vec<RawMarket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarket {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOutcome {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
}

impl RawOddsEvent {
    /// Parse one feed entry. Entries that are not objects yield an empty event.
    pub fn from_value(value: Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    /// The authoritative market: first market of the first bookmaker.
    pub fn primary_market(&self) -> Option<&RawMarket> {
        self.bookmakers.first()?.markets.first()
    }
}

/// Parse a list of live events leniently; a non-array yields no events.
pub fn parse_live_events(value: Value) -> Vec<RawLiveEvent> {
    match value {
        Value::Array(items) => items.into_iter().map(RawLiveEvent::from_value).collect(),
        _ => Vec::new(),
    }
}

/// Parse a list of odds events leniently; a non-array yields no events.
pub fn parse_odds_events(value: Value) -> Vec<RawOddsEvent> {
    match value {
        Value::Array(items) => items.into_iter().map(RawOddsEvent::from_value).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_live_event() {
        let event = RawLiveEvent::from_value(json!({
            "id": "g1",
            "teams": {"home": {"name": "Lakers"}, "away": {"name": "Celtics"}},
            "scores": {"home": {"total": 100}, "away": {"total": 98}},
            "periods": {"q1": {"home": 25, "away": 20}},
            "statistics": {"home": {"points": 100}, "away": {"points": 98}}
        }));
        assert_eq!(event.id, Some(EventId::Text("g1".into())));
        assert_eq!(event.home_name(), Some("Lakers"));
        assert_eq!(event.away_name(), Some("Celtics"));
        assert_eq!(event.home_total(), Some(100.0));
        assert_eq!(event.away_total(), Some(98.0));
        assert_eq!(event.periods.as_ref().map(|p| p.len()), Some(1));
        assert_eq!(event.home_points(), Some(100.0));
    }

    #[test]
    fn test_numeric_id_renders_as_string() {
        let event = RawLiveEvent::from_value(json!({"id": 401585}));
        assert_eq!(event.id.map(|id| id.to_string()), Some("401585".into()));
    }

    #[test]
    fn test_malformed_fields_become_none() {
        let event = RawLiveEvent::from_value(json!({
            "id": {"nested": true},
            "teams": {"home": {"name": 42}, "away": "Celtics"},
            "scores": {"home": {"total": "100"}, "away": null},
            "periods": [1, 2, 3],
            "statistics": 7
        }));
        assert!(event.id.is_none());
        assert!(event.home_name().is_none());
        assert!(event.away_name().is_none());
        assert!(event.home_total().is_none());
        assert!(event.periods.is_none());
        assert!(event.statistics.is_none());
    }

    #[test]
    fn test_malformed_period_entry_keeps_others() {
        let event = RawLiveEvent::from_value(json!({
            "periods": {"q1": {"home": 10, "away": 12}, "q2": "n/a"}
        }));
        let periods = event.periods.expect("periods parsed");
        assert_eq!(periods["q1"].home, Some(10.0));
        assert!(periods["q2"].home.is_none());
    }

    #[test]
    fn test_non_object_entry_is_empty_event() {
        let events = parse_live_events(json!([42, "x", null, {"id": "g2"}]));
        assert_eq!(events.len(), 4);
        assert!(events[0].id.is_none());
        assert_eq!(events[3].id, Some(EventId::Text("g2".into())));
    }

    #[test]
    fn test_odds_event_positions_preserved() {
        let event = RawOddsEvent::from_value(json!({
            "home_team": "Los Angeles Lakers",
            "away_team": "Boston Celtics",
            "bookmakers": [
                "garbage",
                {"markets": [{"outcomes": [{"name": "Boston Celtics", "price": 130}]}]}
            ]
        }));
        assert_eq!(event.bookmakers.len(), 2);
        // First bookmaker was malformed, so there is no primary market
        assert!(event.primary_market().is_none());
    }

    #[test]
    fn test_odds_non_numeric_price() {
        let event = RawOddsEvent::from_value(json!({
            "bookmakers": [{"markets": [{"outcomes": [{"name": "A", "price": "EVEN"}]}]}]
        }));
        let market = event.primary_market().expect("market");
        assert_eq!(market.outcomes[0].name.as_deref(), Some("A"));
        assert!(market.outcomes[0].price.is_none());
    }

    #[test]
    fn test_parse_non_array_feed() {
        assert!(parse_odds_events(json!({"message": "quota exceeded"})).is_empty());
    }
}
