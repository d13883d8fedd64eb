//! Reconciliation core: pure functions over two already-fetched feeds.

pub mod engine;
pub mod normalize;
pub mod odds;
pub mod raw;
pub mod score;

pub use engine::{merge, MatchingConfig, MergedEvent, ReconciliationEngine};
pub use normalize::{composite_key, normalize};
pub use odds::{implied_probability, OddsIndex, OddsQuote};
pub use raw::{parse_live_events, parse_odds_events, EventId, RawLiveEvent, RawOddsEvent};
pub use score::{resolve, ScoreEstimate};
