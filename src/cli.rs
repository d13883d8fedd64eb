use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use crate::reconcile::{MergedEvent, ScoreEstimate};

#[derive(Parser)]
#[command(name = "scoreline")]
#[command(version)]
#[command(about = "Live scores reconciled with sportsbook moneylines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default.toml, <SCORELINE_ENV>.toml)
    #[arg(short, long, default_value = "config", env = "SCORELINE_CONFIG_DIR")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the reconciled board over HTTP
    Serve {
        /// Override server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch both feeds once and print the reconciled board
    Board {
        /// Day to fetch (YYYY-MM-DD), defaults to today (UTC)
        #[arg(short, long)]
        date: Option<chrono::NaiveDate>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Reconcile two saved feed documents without touching the network
    Merge {
        /// Live feed JSON (provider envelope or bare array)
        #[arg(long)]
        live: PathBuf,
        /// Odds feed JSON (array of events)
        #[arg(long)]
        odds: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// One table row per reconciled game.
#[derive(Debug, Tabled)]
pub struct BoardRow {
    pub id: String,
    pub matchup: String,
    pub score: String,
    #[tabled(rename = "away ML")]
    pub away_moneyline: String,
    #[tabled(rename = "home ML")]
    pub home_moneyline: String,
    #[tabled(rename = "away win%")]
    pub away_implied: String,
    #[tabled(rename = "home win%")]
    pub home_implied: String,
}

impl From<&MergedEvent> for BoardRow {
    fn from(event: &MergedEvent) -> Self {
        Self {
            id: event.id.clone(),
            matchup: format!("{} @ {}", event.away_name, event.home_name),
            score: format_score(event.score),
            away_moneyline: format_moneyline(event.odds.away_moneyline),
            home_moneyline: format_moneyline(event.odds.home_moneyline),
            away_implied: format_probability(event.odds.away_implied_probability()),
            home_implied: format_probability(event.odds.home_implied_probability()),
        }
    }
}

fn format_score(score: Option<ScoreEstimate>) -> String {
    match score {
        Some(s) if s.estimated => format!("{}-{} (est.)", s.away, s.home),
        Some(s) => format!("{}-{}", s.away, s.home),
        None => "-".to_string(),
    }
}

fn format_moneyline(price: Option<f64>) -> String {
    match price {
        Some(p) if p > 0.0 => format!("+{p}"),
        Some(p) => format!("{p}"),
        None => "-".to_string(),
    }
}

fn format_probability(prob: Option<Decimal>) -> String {
    match prob {
        Some(p) => format!("{:.1}%", p * Decimal::ONE_HUNDRED),
        None => "-".to_string(),
    }
}

/// Print reconciled games in the chosen mode.
pub fn print_games(games: &[MergedEvent], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if games.is_empty() {
                println!("(no games)");
            } else {
                let rows: Vec<BoardRow> = games.iter().map(BoardRow::from).collect();
                println!("{}", Table::new(rows));
                let unmatched = games.iter().filter(|g| g.odds.is_unresolved()).count();
                if unmatched > 0 {
                    println!("{unmatched} game(s) without odds");
                }
            }
        }
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(games)?);
        }
    }
    Ok(())
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(item: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}
