//! Moneyline index over the odds feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::normalize::{composite_key, normalize, word_suffixes};
use super::raw::{finite, RawMarket, RawOddsEvent};

/// Moneyline prices for both sides of one event (American format).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsQuote {
    pub home_moneyline: Option<f64>,
    pub away_moneyline: Option<f64>,
}

impl OddsQuote {
    /// Both sides unresolved.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_unresolved(&self) -> bool {
        self.home_moneyline.is_none() && self.away_moneyline.is_none()
    }

    pub fn home_implied_probability(&self) -> Option<Decimal> {
        self.home_moneyline.and_then(implied_probability)
    }

    pub fn away_implied_probability(&self) -> Option<Decimal> {
        self.away_moneyline.and_then(implied_probability)
    }
}

/// Convert an American moneyline to decimal odds.
///
/// `+150` → 2.5, `-150` → 1.667. Prices between -100 and +100 exclusive are
/// not valid American odds and yield `None`.
pub fn decimal_odds(american: f64) -> Option<Decimal> {
    if !american.is_finite() {
        return None;
    }
    let decimal = if american >= 100.0 {
        american / 100.0 + 1.0
    } else if american <= -100.0 {
        100.0 / american.abs() + 1.0
    } else {
        return None;
    };
    Decimal::from_f64_retain(decimal)
}

/// Implied win probability (0..1) of an American moneyline, vig included.
pub fn implied_probability(american: f64) -> Option<Decimal> {
    let decimal = decimal_odds(american)?;
    if decimal > Decimal::ZERO {
        Some(Decimal::ONE / decimal)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
struct IndexedQuote {
    /// Whole-word suffixes of each side's name, for nickname matching
    away_suffixes: Vec<String>,
    home_suffixes: Vec<String>,
    quote: OddsQuote,
}

/// Lookup from a normalized (away, home) pair to its moneyline quote.
#[derive(Debug, Clone, Default)]
pub struct OddsIndex {
    entries: HashMap<String, IndexedQuote>,
}

impl OddsIndex {
    /// Index the odds feed. Events with an unmatchable team name are skipped;
    /// a repeated pair overwrites the earlier one.
    pub fn build(events: &[RawOddsEvent]) -> Self {
        let mut entries = HashMap::with_capacity(events.len());

        for event in events {
            let home_key = normalize(event.home_team.as_deref());
            let away_key = normalize(event.away_team.as_deref());
            if home_key.is_empty() || away_key.is_empty() {
                continue;
            }

            let quote = event
                .primary_market()
                .map(|market| OddsQuote {
                    home_moneyline: price_for(market, &home_key),
                    away_moneyline: price_for(market, &away_key),
                })
                .unwrap_or_default();

            entries.insert(
                composite_key(&away_key, &home_key),
                IndexedQuote {
                    away_suffixes: word_suffixes(event.away_team.as_deref()),
                    home_suffixes: word_suffixes(event.home_team.as_deref()),
                    quote,
                },
            );
        }

        Self { entries }
    }

    /// Exact composite-key match.
    pub fn lookup(&self, away_key: &str, home_key: &str) -> Option<OddsQuote> {
        self.entries
            .get(&composite_key(away_key, home_key))
            .map(|entry| entry.quote)
    }

    /// Match by nickname: the single indexed pair whose away and home names
    /// end with the given keys as whole words (`celtics` matches
    /// "Boston Celtics", `nets` does not match "Charlotte Hornets").
    ///
    /// Returns `None` when either key is empty or when more than one pair
    /// qualifies.
    pub fn lookup_by_nickname(&self, away_key: &str, home_key: &str) -> Option<OddsQuote> {
        if away_key.is_empty() || home_key.is_empty() {
            return None;
        }

        let mut found = None;
        for entry in self.entries.values() {
            let away_matches = entry.away_suffixes.iter().any(|s| s == away_key);
            let home_matches = entry.home_suffixes.iter().any(|s| s == home_key);
            if away_matches && home_matches {
                if found.is_some() {
                    return None;
                }
                found = Some(entry.quote);
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Price of the first outcome whose normalized name equals `team_key`.
fn price_for(market: &RawMarket, team_key: &str) -> Option<f64> {
    market
        .outcomes
        .iter()
        .find(|o| normalize(o.name.as_deref()) == team_key)
        .and_then(|o| finite(o.price))
}
