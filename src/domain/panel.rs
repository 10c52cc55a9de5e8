// Trend panel domain model - what the page shows for a series
use super::chart::ChartDescription;
use super::verdict::TrendSummary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPanel {
    pub title: String,
    #[serde(rename = "height")]
    pub height_px: u32,
    /// `None` while there is nothing to plot.
    pub chart: Option<ChartDescription>,
    /// Shown in place of the chart when `chart` is `None`.
    pub placeholder: Option<String>,
    pub summary: Option<TrendSummary>,
}

impl TrendPanel {
    pub fn new(
        title: String,
        height_px: u32,
        chart: Option<ChartDescription>,
        placeholder: Option<String>,
        summary: Option<TrendSummary>,
    ) -> Self {
        Self {
            title,
            height_px,
            chart,
            placeholder,
            summary,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.chart.is_none()
    }
}
