// The Odds API integration
// Fetches moneyline prices from US sportsbooks

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::{ensure_success, http_client, OddsSource};
use crate::config::OddsFeedConfig;
use crate::error::{Result, ScorelineError};
use crate::reconcile::{parse_odds_events, RawOddsEvent};

const FEED: &str = "odds";

/// The Odds API client for fetching sports betting odds
pub struct OddsFeedClient {
    client: Client,
    config: OddsFeedConfig,
    api_key: String,
}

impl OddsFeedClient {
    /// Create new odds client
    pub fn new(config: OddsFeedConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ScorelineError::MissingCredential("odds_feed.api_key".into()))?;

        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
            api_key,
        })
    }

    /// Fetch odds for the configured sport
    pub async fn get_odds(&self) -> Result<Vec<RawOddsEvent>> {
        let url = format!(
            "{}/sports/{}/odds",
            self.config.base_url.trim_end_matches('/'),
            self.config.sport
        );

        debug!("Fetching odds from: {}", url);

        let mut query = vec![
            ("apiKey", self.api_key.clone()),
            ("regions", self.config.regions.clone()),
            ("markets", self.config.markets.clone()),
            ("oddsFormat", self.config.odds_format.clone()),
        ];
        if let Some(bookmakers) = self.config.bookmakers.as_ref().filter(|b| !b.is_empty()) {
            query.push(("bookmakers", bookmakers.join(",")));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        if let Some(remaining) = response
            .headers()
            .get("x-requests-remaining")
            .and_then(|v| v.to_str().ok())
        {
            debug!("Odds API requests remaining: {}", remaining);
        }

        let body: Value = ensure_success(FEED, response).await?.json().await?;
        let events = events_from_document(body)?;

        info!("Fetched {} {} games with odds", events.len(), self.config.sport);
        Ok(events)
    }
}

#[async_trait]
impl OddsSource for OddsFeedClient {
    async fn fetch_odds(&self) -> Result<Vec<RawOddsEvent>> {
        self.get_odds().await
    }
}

/// The odds endpoint answers with a bare array of events.
pub fn events_from_document(body: Value) -> Result<Vec<RawOddsEvent>> {
    match body {
        Value::Array(_) => Ok(parse_odds_events(body)),
        other => Err(ScorelineError::InvalidFeed {
            feed: FEED,
            reason: format!(
                "expected an array of events, got {}",
                other
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("a non-array document")
            ),
        }),
    }
}
