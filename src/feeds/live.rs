//! Live-score feed client (API-Sports `/games` endpoint).
//!
//! The provider wraps events in an envelope:
//! `{"errors": [] | {}, "results": n, "response": [...]}`. Errors are
//! reported with HTTP 200, so the envelope is checked before events are read.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::{ensure_success, http_client, LiveSource};
use crate::config::LiveFeedConfig;
use crate::error::{Result, ScorelineError};
use crate::reconcile::{parse_live_events, RawLiveEvent};

const FEED: &str = "live";
const API_KEY_HEADER: &str = "x-apisports-key";

pub struct LiveFeedClient {
    client: Client,
    config: LiveFeedConfig,
    api_key: String,
}

impl LiveFeedClient {
    pub fn new(config: LiveFeedConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ScorelineError::MissingCredential("live_feed.api_key".into()))?;

        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
            api_key,
        })
    }

    /// Fetch the games scheduled on `date`.
    pub async fn get_games(&self, date: NaiveDate) -> Result<Vec<RawLiveEvent>> {
        let url = format!("{}/games", self.config.base_url.trim_end_matches('/'));
        let date = date.format("%Y-%m-%d").to_string();
        let league = self.config.league.to_string();

        debug!("Fetching live games from: {} (date={})", url, date);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("date", date.as_str()),
                ("league", league.as_str()),
                ("season", self.config.season.as_str()),
                ("timezone", self.config.timezone.as_str()),
            ])
            .send()
            .await?;

        let body: Value = ensure_success(FEED, response).await?.json().await?;
        let events = events_from_envelope(body)?;

        info!("Fetched {} live games for {}", events.len(), date);
        Ok(events)
    }
}

#[async_trait]
impl LiveSource for LiveFeedClient {
    async fn fetch_live(&self, date: NaiveDate) -> Result<Vec<RawLiveEvent>> {
        self.get_games(date).await
    }
}

/// Read events from a provider envelope, surfacing reported errors.
pub fn events_from_envelope(mut body: Value) -> Result<Vec<RawLiveEvent>> {
    if let Some(errors) = body.get("errors") {
        let reported = match errors {
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
            Value::Null => false,
            _ => true,
        };
        if reported {
            return Err(ScorelineError::InvalidFeed {
                feed: FEED,
                reason: format!("provider reported errors: {errors}"),
            });
        }
    }

    match body.get_mut("response").map(Value::take) {
        Some(events @ Value::Array(_)) => Ok(parse_live_events(events)),
        _ => Err(ScorelineError::InvalidFeed {
            feed: FEED,
            reason: "missing `response` array".into(),
        }),
    }
}

/// Accept either a provider envelope or a bare event array (saved fixtures).
pub fn events_from_document(body: Value) -> Result<Vec<RawLiveEvent>> {
    match body {
        Value::Array(_) => Ok(parse_live_events(body)),
        other => events_from_envelope(other),
    }
}
