// HTTP request handlers
use crate::domain::panel::TrendPanel;
use crate::domain::trend::DailyRecord;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub days: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Build the trend panel for a caller-supplied series
pub async fn render_trend(
    State(state): State<Arc<AppState>>,
    Json(series): Json<Vec<DailyRecord>>,
) -> Json<TrendPanel> {
    Json(state.trend_service.build_panel(Some(&series)))
}

/// Build the trend panel from the configured data source
pub async fn load_trend(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<TrendPanel> {
    Json(state.trend_service.load_panel(query.days).await)
}
