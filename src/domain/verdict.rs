// Trend verdict - net change between the first and last day of a series
use super::format::group_digits;
use super::trend::DailyRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendVerdict {
    /// Fewer than two days; no summary is shown.
    NoData,
    /// Started from zero. Only the absolute delta is reported.
    NewData { delta: i64 },
    NoChange,
    Increase { pct: i64 },
    Decrease { pct: i64 },
}

/// Compares the first and last record of a date-ordered series.
///
/// The percentage is `|last - first| / first * 100` rounded half away from zero.
/// An unchanged non-zero series is reported as `Increase { pct: 0 }`.
pub fn summarize(series: &[DailyRecord]) -> TrendVerdict {
    let (first, last) = match series {
        [first, .., last] => (first.drivers(), last.drivers()),
        _ => return TrendVerdict::NoData,
    };

    if first == 0 {
        return if last > 0 {
            TrendVerdict::NewData { delta: last }
        } else {
            TrendVerdict::NoChange
        };
    }

    let diff = last as f64 - first as f64;
    let pct = (diff.abs() / first as f64 * 100.0).round() as i64;

    if diff >= 0.0 {
        TrendVerdict::Increase { pct }
    } else {
        TrendVerdict::Decrease { pct }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Affirmative,
    Warning,
    Neutral,
}

/// Display form of a verdict: directional glyph, text and color hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
    pub text: String,
    pub tone: Tone,
}

impl TrendSummary {
    /// `None` for `NoData`, which is not displayed at all.
    pub fn from_verdict(verdict: TrendVerdict, unit_suffix: &str) -> Option<Self> {
        let summary = match verdict {
            TrendVerdict::NoData => return None,
            TrendVerdict::NewData { delta } => Self {
                glyph: Some('▲'),
                text: format!("New data (+{} {} from 0)", group_digits(delta), unit_suffix),
                tone: Tone::Affirmative,
            },
            TrendVerdict::NoChange => Self {
                glyph: None,
                text: "No change".to_string(),
                tone: Tone::Neutral,
            },
            TrendVerdict::Increase { pct } => Self {
                glyph: Some('▲'),
                text: format!("{}% increase over period", pct),
                tone: Tone::Affirmative,
            },
            TrendVerdict::Decrease { pct } => Self {
                glyph: Some('▼'),
                text: format!("{}% decrease over period", pct),
                tone: Tone::Warning,
            },
        };
        Some(summary)
    }
}

impl std::fmt::Display for TrendSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.glyph {
            Some(glyph) => write!(f, "{} {}", glyph, self.text),
            None => f.write_str(&self.text),
        }
    }
}
