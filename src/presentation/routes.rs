// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, load_trend, render_trend};
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/trend", get(load_trend).post(render_trend))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::trend_repository::TrendRepository;
    use crate::application::trend_service::TrendService;
    use crate::domain::chart::ChartSettings;
    use crate::domain::trend::DailyRecord;
    use crate::infrastructure::config::PanelSettings;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    struct StaticRepository(Vec<DailyRecord>);

    #[async_trait]
    impl TrendRepository for StaticRepository {
        async fn daily_driver_counts(&self, days: u32) -> anyhow::Result<Vec<DailyRecord>> {
            Ok(self.0.iter().take(days as usize).cloned().collect())
        }
    }

    fn router(records: Vec<DailyRecord>) -> Router {
        let trend_service = TrendService::new(
            Arc::new(StaticRepository(records)),
            PanelSettings::default(),
            ChartSettings::default(),
        );
        build_router(Arc::new(AppState { trend_service }))
    }

    fn day(d: u32, drivers: i64) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(2024, 4, d).unwrap(), Some(drivers))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = router(Vec::new())
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_post_trend_renders_panel() {
        let body = r#"[
            {"date": "2024-04-01", "totalDrivers": 3},
            {"date": "2024-04-02", "totalDrivers": 4}
        ]"#;
        let request = Request::post("/trend")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = router(Vec::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["title"], "30-Day Trend");
        assert_eq!(json["height"], 300);
        assert_eq!(json["placeholder"], Value::Null);
        assert_eq!(json["chart"]["data"]["labels"], serde_json::json!(["4/1/2024", "4/2/2024"]));
        assert_eq!(json["chart"]["data"]["datasets"][0]["data"], serde_json::json!([3, 4]));
        assert_eq!(json["summary"]["text"], "33% increase over period");
        assert_eq!(json["summary"]["glyph"], "▲");
        assert_eq!(json["summary"]["tone"], "affirmative");
    }

    #[tokio::test]
    async fn test_post_empty_trend_is_placeholder() {
        let request = Request::post("/trend")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("[]"))
            .unwrap();

        let json = json_body(router(Vec::new()).oneshot(request).await.unwrap()).await;
        assert_eq!(json["chart"], Value::Null);
        assert_eq!(json["placeholder"], "Loading trend data...");
        assert_eq!(json["summary"], Value::Null);
    }

    #[tokio::test]
    async fn test_post_malformed_body_is_rejected() {
        let request = Request::post("/trend")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"[{"date": "soon"}]"#))
            .unwrap();

        let response = router(Vec::new()).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_get_trend_loads_from_repository() {
        let records = vec![day(1, 200), day(2, 190), day(3, 150)];
        let response = router(records)
            .oneshot(Request::get("/trend?days=2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = json_body(response).await;
        assert_eq!(json["chart"]["data"]["labels"], serde_json::json!(["4/1/2024", "4/2/2024"]));
        assert_eq!(json["summary"]["text"], "5% decrease over period");
        assert_eq!(json["summary"]["tone"], "warning");
    }
}
