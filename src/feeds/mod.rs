//! Upstream feed clients.
//!
//! The board service depends only on the [`LiveSource`] and [`OddsSource`]
//! traits; the reqwest-backed clients are the production implementations.

pub mod live;
pub mod odds;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::reconcile::{RawLiveEvent, RawOddsEvent};

pub use live::LiveFeedClient;
pub use odds::OddsFeedClient;

/// Provider of raw live-score events for a given day.
#[async_trait]
pub trait LiveSource: Send + Sync + 'static {
    async fn fetch_live(&self, date: NaiveDate) -> Result<Vec<RawLiveEvent>>;
}

/// Provider of raw odds events.
#[async_trait]
pub trait OddsSource: Send + Sync + 'static {
    async fn fetch_odds(&self) -> Result<Vec<RawOddsEvent>>;
}

const MAX_ERROR_BODY: usize = 512;

/// Build a reqwest client with a request timeout.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}

/// Turn a non-2xx response into an `Upstream` error, keeping a short body.
pub(crate) async fn ensure_success(
    feed: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    Err(crate::error::ScorelineError::Upstream {
        feed,
        status: status.as_u16(),
        body,
    })
}
