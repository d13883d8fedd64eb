//! Tiered score derivation for a single live event.
//!
//! Tiers are tried in a fixed order and each is all-or-nothing:
//! 1. direct totals (authoritative, `estimated = false`)
//! 2. sum of per-period values
//! 3. box-score `points`

use serde::{Deserialize, Serialize};

use super::raw::{finite, RawLiveEvent};

/// Best-available score for one event. `home` and `away` are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEstimate {
    pub home: f64,
    pub away: f64,
    /// `false` only when the score came from the direct-total tier.
    pub estimated: bool,
}

impl ScoreEstimate {
    fn direct(home: f64, away: f64) -> Self {
        Self {
            home,
            away,
            estimated: false,
        }
    }

    fn estimate(home: f64, away: f64) -> Self {
        Self {
            home,
            away,
            estimated: true,
        }
    }
}

/// Resolve the best available score, or `None` if no tier qualifies.
pub fn resolve(event: &RawLiveEvent) -> Option<ScoreEstimate> {
    direct_totals(event).or_else(|| estimate(event))
}

/// Tier 1: both current totals present and finite.
pub fn direct_totals(event: &RawLiveEvent) -> Option<ScoreEstimate> {
    let home = event.home_total()?;
    let away = event.away_total()?;
    Some(ScoreEstimate::direct(home, away))
}

/// Tiers 2 and 3, used when the direct totals are unavailable.
pub fn estimate(event: &RawLiveEvent) -> Option<ScoreEstimate> {
    from_periods(event).or_else(|| from_statistics(event))
}

/// Tier 2: sum every finite period value per side.
///
/// Qualifies when at least one finite value exists on either side and both
/// sums stay finite. A side with no values sums to zero.
fn from_periods(event: &RawLiveEvent) -> Option<ScoreEstimate> {
    let periods = event.periods.as_ref()?;

    let mut home = 0.0;
    let mut away = 0.0;
    let mut has_value = false;

    for period in periods.values() {
        if let Some(h) = finite(period.home) {
            home += h;
            has_value = true;
        }
        if let Some(a) = finite(period.away) {
            away += a;
            has_value = true;
        }
    }

    if !has_value || !home.is_finite() || !away.is_finite() {
        return None;
    }
    Some(ScoreEstimate::estimate(home, away))
}

/// Tier 3: box-score points for both sides.
fn from_statistics(event: &RawLiveEvent) -> Option<ScoreEstimate> {
    let home = event.home_points()?;
    let away = event.away_points()?;
    Some(ScoreEstimate::estimate(home, away))
}
