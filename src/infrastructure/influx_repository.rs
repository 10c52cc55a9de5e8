// InfluxDB repository implementation
use crate::application::trend_repository::TrendRepository;
use crate::domain::trend::{parse_calendar_date, DailyRecord};
use crate::infrastructure::config::{prepare_query, InfluxSettings};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

const VALUE_COLUMNS: [&str; 5] = ["value", "last", "sum", "mean", "max"];

#[derive(Debug, thiserror::Error)]
pub enum InfluxError {
    #[error("failed to send request to InfluxDB: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("InfluxDB query failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("InfluxDB query error: {0}")]
    Query(String),
}

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    client: reqwest::Client,
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    daily_query: String,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    columns: Vec<String>,
    values: Vec<Vec<serde_json::Value>>,
}

impl InfluxRepository {
    pub fn new(settings: InfluxSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token,
            database: settings.database,
            retention_policy: settings.retention_policy,
            daily_query: settings.daily_query,
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse, InfluxError> {
        let url = self.build_query_url(query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InfluxError::Status { status, body });
        }

        let data = response.json::<InfluxQLResponse>().await?;

        if let Some(error) = data.results.first().and_then(|r| r.error.clone()) {
            return Err(InfluxError::Query(error));
        }

        Ok(data)
    }

    /// One record per row, in the order InfluxDB returned them.
    /// Rows whose time cannot be read are skipped; a null value is a missing count.
    fn records_from_response(response: &InfluxQLResponse) -> Vec<DailyRecord> {
        let mut records = Vec::new();

        let Some(series_list) = response.results.first().and_then(|r| r.series.as_ref()) else {
            return records;
        };

        for s in series_list {
            let time_idx = s.columns.iter().position(|c| c == "time").unwrap_or(0);
            let value_idx = s
                .columns
                .iter()
                .position(|c| VALUE_COLUMNS.contains(&c.as_str()))
                .unwrap_or(1);

            for row in &s.values {
                let Some(date) = row
                    .get(time_idx)
                    .and_then(|t| t.as_str())
                    .and_then(parse_calendar_date)
                else {
                    tracing::warn!("Skipping row with unreadable time: {:?}", row);
                    continue;
                };

                let total_drivers = row.get(value_idx).and_then(|v| {
                    v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64))
                });

                records.push(DailyRecord::new(date, total_drivers));
            }
        }

        records
    }
}

#[async_trait]
impl TrendRepository for InfluxRepository {
    async fn daily_driver_counts(&self, days: u32) -> Result<Vec<DailyRecord>> {
        let mut vars = HashMap::new();
        vars.insert("days".to_string(), days.to_string());
        let query = prepare_query(&self.daily_query, &vars);

        tracing::debug!("Executing daily driver query: {}", query);
        let response = self.execute_query(&query).await?;

        let records = Self::records_from_response(&response);
        tracing::debug!("Got {} daily records from InfluxDB", records.len());
        Ok(records)
    }
}
