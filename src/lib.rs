//! Live sports scoreboard reconciled with sportsbook moneylines.
//!
//! [`reconcile`] is the pure core: it joins a live-score feed and an odds feed
//! into one [`reconcile::MergedEvent`] per live game. [`feeds`], [`services`]
//! and [`api`] fetch the feeds and serve the result.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod feeds;
pub mod reconcile;
pub mod services;

pub use config::AppConfig;
pub use error::{Result, ScorelineError};
pub use reconcile::{merge, MergedEvent, OddsQuote, ScoreEstimate};
pub use services::{Board, BoardService};
