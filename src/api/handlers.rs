use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use tracing::error;

use crate::api::{
    state::AppState,
    types::{BoardQuery, ErrorResponse, HealthResponse},
};
use crate::services::Board;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// GET /health -- liveness probe
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_seconds(),
    })
}

/// GET /api/board -- reconciled scores and moneylines
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> std::result::Result<Json<Board>, ApiError> {
    let board = match query.date.as_deref() {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                api_error(
                    StatusCode::BAD_REQUEST,
                    format!("invalid date `{raw}`, expected YYYY-MM-DD"),
                )
            })?;
            state.board.snapshot(date).await
        }
        None => state.board.current().await,
    };

    board.map(Json).map_err(|e| {
        error!("Board request failed: {}", e);
        let status = if e.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        api_error(status, e.to_string())
    })
}
