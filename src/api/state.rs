use chrono::{DateTime, Utc};

use crate::services::BoardService;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Feed fetch + reconciliation
    pub board: BoardService,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(board: BoardService) -> Self {
        Self {
            board,
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.start_time).num_seconds().max(0) as u64
    }
}
