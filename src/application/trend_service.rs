// Trend service - Use case for building the trend panel
use crate::application::trend_repository::TrendRepository;
use crate::domain::chart::{transform_series, ChartSettings};
use crate::domain::panel::TrendPanel;
use crate::domain::trend::DailyRecord;
use crate::domain::verdict::{summarize, TrendSummary};
use crate::infrastructure::config::PanelSettings;
use std::sync::Arc;

const MAX_DAYS: u32 = 366;

#[derive(Clone)]
pub struct TrendService {
    repository: Arc<dyn TrendRepository>,
    panel_settings: PanelSettings,
    chart_settings: ChartSettings,
}

impl TrendService {
    pub fn new(
        repository: Arc<dyn TrendRepository>,
        panel_settings: PanelSettings,
        chart_settings: ChartSettings,
    ) -> Self {
        Self {
            repository,
            panel_settings,
            chart_settings,
        }
    }

    /// Chart, placeholder and summary for one snapshot of the series.
    /// An absent or empty series yields the placeholder panel.
    pub fn build_panel(&self, series: Option<&[DailyRecord]>) -> TrendPanel {
        let series = series.unwrap_or_default();

        let chart = transform_series(series, &self.chart_settings)
            .description()
            .cloned();
        let placeholder = match chart {
            Some(_) => None,
            None => Some(self.panel_settings.placeholder.clone()),
        };

        let verdict = summarize(series);
        tracing::debug!("Trend verdict over {} days: {:?}", series.len(), verdict);
        let summary = TrendSummary::from_verdict(verdict, &self.chart_settings.unit_suffix);

        TrendPanel::new(
            self.panel_settings.title.clone(),
            self.panel_settings.height_px,
            chart,
            placeholder,
            summary,
        )
    }

    /// Fetch the last `days` days (configured default when `None`) and build the panel.
    /// A failed fetch is logged and shown as the placeholder.
    pub async fn load_panel(&self, days: Option<u32>) -> TrendPanel {
        let days = days
            .unwrap_or(self.panel_settings.default_days)
            .clamp(1, MAX_DAYS);

        match self.repository.daily_driver_counts(days).await {
            Ok(series) => {
                tracing::debug!("Loaded {} daily records for the last {} days", series.len(), days);
                let panel = self.build_panel(Some(&series));
                if panel.is_placeholder() {
                    tracing::warn!("No daily driver counts in the last {} days", days);
                }
                panel
            }
            Err(e) => {
                tracing::error!("Error fetching daily driver counts: {:#}", e);
                self.build_panel(None)
            }
        }
    }
}
