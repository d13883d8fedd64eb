use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::reconcile::MatchingConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub live_feed: LiveFeedConfig,
    #[serde(default)]
    pub odds_feed: OddsFeedConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Live-score provider (API-Sports style `/games` endpoint)
#[derive(Debug, Clone, Deserialize)]
pub struct LiveFeedConfig {
    #[serde(default = "default_live_base_url")]
    pub base_url: String,
    /// Sent as `x-apisports-key`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Provider league id (12 = NBA)
    #[serde(default = "default_league")]
    pub league: u32,
    #[serde(default = "default_season")]
    pub season: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_live_base_url() -> String {
    "https://v1.basketball.api-sports.io".to_string()
}

fn default_league() -> u32 {
    12
}

fn default_season() -> String {
    "2024-2025".to_string()
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for LiveFeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_live_base_url(),
            api_key: None,
            league: default_league(),
            season: default_season(),
            timezone: default_timezone(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Odds provider (The Odds API v4)
#[derive(Debug, Clone, Deserialize)]
pub struct OddsFeedConfig {
    #[serde(default = "default_odds_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sport key, e.g. "basketball_nba"
    #[serde(default = "default_sport")]
    pub sport: String,
    #[serde(default = "default_regions")]
    pub regions: String,
    #[serde(default = "default_markets")]
    pub markets: String,
    #[serde(default = "default_odds_format")]
    pub odds_format: String,
    /// Restrict to these bookmaker keys; the provider's order decides which
    /// one comes first
    #[serde(default)]
    pub bookmakers: Option<Vec<String>>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_odds_base_url() -> String {
    "https://api.the-odds-api.com/v4".to_string()
}

fn default_sport() -> String {
    "basketball_nba".to_string()
}

fn default_regions() -> String {
    "us".to_string()
}

fn default_markets() -> String {
    "h2h".to_string()
}

fn default_odds_format() -> String {
    "american".to_string()
}

impl Default for OddsFeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_odds_base_url(),
            api_key: None,
            sport: default_sport(),
            regions: default_regions(),
            markets: default_markets(),
            odds_format: default_odds_format(),
            bookmakers: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for daily-rotated log files; console only when unset
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("SCORELINE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (SCORELINE_ODDS_FEED__API_KEY, etc.)
            .add_source(
                Environment::with_prefix("SCORELINE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("odds_feed.bookmakers"),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        let listen = format!("{}:{}", self.server.host, self.server.port);
        if listen.parse::<std::net::SocketAddr>().is_err() {
            errors.push(format!("server.host must be an IP address: {}", self.server.host));
        }

        for (name, url) in [
            ("live_feed.base_url", &self.live_feed.base_url),
            ("odds_feed.base_url", &self.odds_feed.base_url),
        ] {
            if url::Url::parse(url).is_err() {
                errors.push(format!("{name} is not a valid URL: {url}"));
            }
        }

        if self.live_feed.timeout_secs == 0 || self.odds_feed.timeout_secs == 0 {
            errors.push("feed timeout_secs must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
