// Chart domain model - turns a daily series into a line chart description
use super::format::group_digits;
use super::trend::DailyRecord;
use chrono::NaiveDate;
use serde::ser::{Serialize, Serializer};
use std::fmt::Write;

pub const DEFAULT_DATASET_LABEL: &str = "Active Drivers";
pub const DEFAULT_BORDER_COLOR: &str = "rgb(59, 130, 246)";
pub const DEFAULT_FILL_COLOR: &str = "rgba(59, 130, 246, 0.1)";
pub const DEFAULT_TENSION: f64 = 0.3;
pub const DEFAULT_UNIT_SUFFIX: &str = "drivers";
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Knobs for the transformer. Defaults reproduce the stock driver chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub dataset_label: String,
    pub border_color: String,
    pub fill_color: String,
    pub tension: f64,
    pub unit_suffix: String,
    pub date_format: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            dataset_label: DEFAULT_DATASET_LABEL.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            tension: DEFAULT_TENSION,
            unit_suffix: DEFAULT_UNIT_SUFFIX.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub label: String,
    pub border_color: String,
    pub fill_color: String,
    pub tension: f64,
    /// Area under the line; the renderer needs its filler support enabled.
    pub fill: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
}

impl LegendPosition {
    fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::Top => "top",
        }
    }
}

/// How point values and tooltips are turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingPolicy {
    pub unit_suffix: String,
}

impl FormattingPolicy {
    pub fn format_point(&self, value: i64) -> String {
        group_digits(value)
    }

    pub fn format_tooltip(&self, value: i64) -> String {
        format!(" {} {}", group_digits(value), self.unit_suffix)
    }
}

/// Renderer options recognised by the line chart collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub legend_position: LegendPosition,
    pub begin_at_zero: bool,
    pub formatting: FormattingPolicy,
}

impl ChartOptions {
    fn for_settings(settings: &ChartSettings) -> Self {
        Self {
            responsive: true,
            // The chart sits in a fixed-height container
            maintain_aspect_ratio: false,
            legend_position: LegendPosition::Top,
            begin_at_zero: false,
            formatting: FormattingPolicy {
                unit_suffix: settings.unit_suffix.clone(),
            },
        }
    }
}

/// Render-agnostic line chart. `labels[i]` and `points[i]` describe the same day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    pub labels: Vec<String>,
    pub points: Vec<Option<i64>>,
    pub style: ChartStyle,
    pub options: ChartOptions,
}

impl ChartDescription {
    /// Grouped-digit text per point, for renderers without a formatter hook.
    pub fn point_labels(&self) -> Vec<Option<String>> {
        self.points
            .iter()
            .map(|p| p.map(|v| self.options.formatting.format_point(v)))
            .collect()
    }

    /// Tooltip text per point; `None` where the day has no count.
    pub fn tooltips(&self) -> Vec<Option<String>> {
        self.points
            .iter()
            .map(|p| p.map(|v| self.options.formatting.format_tooltip(v)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// Nothing to plot yet; show the placeholder instead of a chart.
    InsufficientData,
    Ready(ChartDescription),
}

impl ChartState {
    pub fn description(&self) -> Option<&ChartDescription> {
        match self {
            ChartState::InsufficientData => None,
            ChartState::Ready(description) => Some(description),
        }
    }
}

pub fn transform_series(series: &[DailyRecord], settings: &ChartSettings) -> ChartState {
    if series.is_empty() {
        return ChartState::InsufficientData;
    }

    let labels = series
        .iter()
        .map(|record| format_date_label(record.date, &settings.date_format))
        .collect();
    let points = series.iter().map(|record| record.total_drivers).collect();

    ChartState::Ready(ChartDescription {
        labels,
        points,
        style: ChartStyle {
            label: settings.dataset_label.clone(),
            border_color: settings.border_color.clone(),
            fill_color: settings.fill_color.clone(),
            tension: settings.tension,
            fill: true,
        },
        options: ChartOptions::for_settings(settings),
    })
}

/// Falls back to ISO `YYYY-MM-DD` if the pattern cannot be rendered.
pub fn format_date_label(date: NaiveDate, pattern: &str) -> String {
    let mut label = String::new();
    match write!(label, "{}", date.format(pattern)) {
        Ok(()) => label,
        Err(_) => date.to_string(),
    }
}

// Wire shape handed to the renderer: data/datasets/options
mod wire {
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Chart<'a> {
        #[serde(rename = "type")]
        pub kind: &'static str,
        pub data: Data<'a>,
        pub options: Options<'a>,
        pub point_labels: Vec<Option<String>>,
        pub tooltips: Vec<Option<String>>,
    }

    #[derive(Serialize)]
    pub struct Data<'a> {
        pub labels: &'a [String],
        pub datasets: [Dataset<'a>; 1],
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Dataset<'a> {
        pub label: &'a str,
        pub data: &'a [Option<i64>],
        pub border_color: &'a str,
        pub background_color: &'a str,
        pub tension: f64,
        pub fill: bool,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Options<'a> {
        pub responsive: bool,
        pub maintain_aspect_ratio: bool,
        pub plugins: Plugins<'a>,
        pub scales: Scales,
    }

    #[derive(Serialize)]
    pub struct Plugins<'a> {
        pub legend: Legend,
        pub tooltip: Tooltip<'a>,
    }

    #[derive(Serialize)]
    pub struct Legend {
        pub position: &'static str,
    }

    #[derive(Serialize)]
    pub struct Tooltip<'a> {
        pub label: ValueFormat<'a>,
    }

    #[derive(Serialize)]
    pub struct ValueFormat<'a> {
        pub format: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub suffix: Option<&'a str>,
    }

    #[derive(Serialize)]
    pub struct Scales {
        pub y: YAxis,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct YAxis {
        pub begin_at_zero: bool,
        pub ticks: Ticks,
    }

    #[derive(Serialize)]
    pub struct Ticks {
        pub format: &'static str,
    }
}

const GROUPED_DIGITS: &str = "grouped-digits";

impl Serialize for ChartDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let chart = wire::Chart {
            kind: "line",
            data: wire::Data {
                labels: &self.labels,
                datasets: [wire::Dataset {
                    label: &self.style.label,
                    data: &self.points,
                    border_color: &self.style.border_color,
                    background_color: &self.style.fill_color,
                    tension: self.style.tension,
                    fill: self.style.fill,
                }],
            },
            options: wire::Options {
                responsive: self.options.responsive,
                maintain_aspect_ratio: self.options.maintain_aspect_ratio,
                plugins: wire::Plugins {
                    legend: wire::Legend {
                        position: self.options.legend_position.as_str(),
                    },
                    tooltip: wire::Tooltip {
                        label: wire::ValueFormat {
                            format: GROUPED_DIGITS,
                            suffix: Some(self.options.formatting.unit_suffix.as_str()),
                        },
                    },
                },
                scales: wire::Scales {
                    y: wire::YAxis {
                        begin_at_zero: self.options.begin_at_zero,
                        ticks: wire::Ticks {
                            format: GROUPED_DIGITS,
                        },
                    },
                },
            },
            point_labels: self.point_labels(),
            tooltips: self.tooltips(),
        };
        chart.serialize(serializer)
    }
}
