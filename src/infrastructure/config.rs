use crate::domain::chart::{
    ChartSettings, DEFAULT_BORDER_COLOR, DEFAULT_DATASET_LABEL, DEFAULT_DATE_FORMAT,
    DEFAULT_FILL_COLOR, DEFAULT_TENSION, DEFAULT_UNIT_SUFFIX,
};
use chrono::format::{Item, StrftimeItems};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxConfig {
    pub influx: InfluxSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
    /// InfluxQL returning one row per day; `${days}` is substituted.
    pub daily_query: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TrendConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub trend: PanelSettings,
    #[serde(default)]
    pub style: StyleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_dataset_label")]
    pub dataset_label: String,
    #[serde(default = "default_unit_suffix")]
    pub unit_suffix: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_days")]
    pub default_days: u32,
    #[serde(default = "default_height_px")]
    pub height_px: u32,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            dataset_label: default_dataset_label(),
            unit_suffix: default_unit_suffix(),
            date_format: default_date_format(),
            default_days: default_days(),
            height_px: default_height_px(),
            placeholder: default_placeholder(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StyleSettings {
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default = "default_tension")]
    pub tension: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            border_color: default_border_color(),
            fill_color: default_fill_color(),
            tension: default_tension(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_title() -> String {
    "30-Day Trend".to_string()
}

fn default_dataset_label() -> String {
    DEFAULT_DATASET_LABEL.to_string()
}

fn default_unit_suffix() -> String {
    DEFAULT_UNIT_SUFFIX.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_days() -> u32 {
    30
}

fn default_height_px() -> u32 {
    300
}

fn default_placeholder() -> String {
    "Loading trend data...".to_string()
}

fn default_border_color() -> String {
    DEFAULT_BORDER_COLOR.to_string()
}

fn default_fill_color() -> String {
    DEFAULT_FILL_COLOR.to_string()
}

fn default_tension() -> f64 {
    DEFAULT_TENSION
}

impl TrendConfig {
    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            dataset_label: self.trend.dataset_label.clone(),
            border_color: self.style.border_color.clone(),
            fill_color: self.style.fill_color.clone(),
            tension: self.style.tension,
            unit_suffix: self.trend.unit_suffix.clone(),
            date_format: self.trend.date_format.clone(),
        }
    }
}

pub fn load_influx_config() -> anyhow::Result<InfluxConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/influx"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `config/trend` is optional; `TREND__SECTION__KEY` variables override it.
pub fn load_trend_config() -> anyhow::Result<TrendConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/trend").required(false))
        .add_source(
            config::Environment::with_prefix("TREND")
                .prefix_separator("__")
                .separator("__"),
        );

    trend_config_from(builder)
}

fn trend_config_from(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<TrendConfig> {
    let trend_config: TrendConfig = builder.build()?.try_deserialize()?;

    let pattern = &trend_config.trend.date_format;
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("invalid trend.date_format: {}", pattern);
    }
    if !(0.0..=1.0).contains(&trend_config.style.tension) {
        anyhow::bail!("style.tension must be within 0..=1, got {}", trend_config.style.tension);
    }

    Ok(trend_config)
}

/// Replace template variables in a query string
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
