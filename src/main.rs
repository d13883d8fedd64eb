use clap::Parser;
use scoreline::api::{start_api_server, AppState};
use scoreline::cli::{self, Cli, Commands, OutputMode};
use scoreline::config::AppConfig;
use scoreline::error::{Result, ScorelineError};
use scoreline::feeds::{self, LiveFeedClient, OddsFeedClient};
use scoreline::reconcile::ReconciliationEngine;
use scoreline::services::BoardService;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

mod main_runtime;

use main_runtime::{init_logging, init_logging_simple};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = load_config(&cli.config)?;
            init_logging(&config.logging);
            run_serve_mode(config, port).await?;
        }
        Commands::Board { date, json } => {
            init_logging_simple();
            let config = load_config(&cli.config)?;
            let service = build_board_service(&config)?;
            let board = match date {
                Some(date) => service.snapshot(date).await?,
                None => service.current().await?,
            };
            match OutputMode::from_json_flag(json) {
                OutputMode::Json => cli::print_json(&board)?,
                mode => {
                    println!("Updated {}", board.updated_at.to_rfc3339());
                    cli::print_games(&board.games, mode)?;
                }
            }
        }
        Commands::Merge { live, odds, json } => {
            init_logging_simple();
            let config = load_config(&cli.config)?;
            run_merge_mode(&config, &live, &odds, OutputMode::from_json_flag(json))?;
        }
    }

    Ok(())
}

fn load_config(dir: &Path) -> Result<AppConfig> {
    let config = AppConfig::load_from(dir)?;
    config.validate().map_err(|errors| {
        ScorelineError::Internal(format!("Invalid configuration: {}", errors.join("; ")))
    })?;
    Ok(config)
}

fn build_board_service(config: &AppConfig) -> Result<BoardService> {
    let live = LiveFeedClient::new(config.live_feed.clone())?;
    let odds = OddsFeedClient::new(config.odds_feed.clone())?;
    Ok(BoardService::new(
        Arc::new(live),
        Arc::new(odds),
        ReconciliationEngine::new(config.matching),
    ))
}

async fn run_serve_mode(config: AppConfig, port: Option<u16>) -> Result<()> {
    let service = build_board_service(&config)?;
    let port = port.unwrap_or(config.server.port);

    info!(
        "Serving {} board (live league {}, odds sport {})",
        config.live_feed.season, config.live_feed.league, config.odds_feed.sport
    );

    let server = start_api_server(AppState::new(service), &config.server.host, port);
    tokio::select! {
        result = server => {
            if let Err(e) = &result {
                error!("API server stopped: {}", e);
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}

fn run_merge_mode(
    config: &AppConfig,
    live_path: &Path,
    odds_path: &Path,
    mode: OutputMode,
) -> Result<()> {
    let live_events = feeds::live::events_from_document(read_json(live_path)?)?;
    let odds_events = feeds::odds::events_from_document(read_json(odds_path)?)?;

    let games = ReconciliationEngine::new(config.matching).merge(&live_events, &odds_events);
    cli::print_games(&games, mode)?;
    Ok(())
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
