// Daily driver count domain model
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// One day of the trend: the calendar date and the number of active drivers.
///
/// `total_drivers` may be absent when the source had no value for that day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub total_drivers: Option<i64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, total_drivers: Option<i64>) -> Self {
        Self {
            date,
            total_drivers,
        }
    }

    /// Driver count with a missing value read as zero.
    pub fn drivers(&self) -> i64 {
        self.total_drivers.unwrap_or(0)
    }
}

/// Accepts a plain date (`2024-03-01`), an RFC 3339 timestamp or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp. Timestamps keep the calendar date they were
/// written with; no timezone conversion is applied.
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognised date value: {}", raw))
    })
}

pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drivers_defaults_missing_count_to_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(DailyRecord::new(date, None).drivers(), 0);
        assert_eq!(DailyRecord::new(date, Some(42)).drivers(), 42);
        assert_eq!(DailyRecord::new(date, Some(-5)).drivers(), -5);
    }

    #[test]
    fn test_deserialize_camel_case_records() {
        let json = r#"[
            {"date": "2024-03-01", "totalDrivers": 120},
            {"date": "2024-03-02T23:30:00-05:00", "totalDrivers": null},
            {"date": "2024-03-03T08:00:00"}
        ]"#;
        let records: Vec<DailyRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].total_drivers, Some(120));
        // Offset timestamps keep their own calendar date
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(records[1].total_drivers, None);
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(records[2].total_drivers, None);
    }

    #[test]
    fn test_deserialize_rejects_garbage_date() {
        let json = r#"{"date": "yesterday", "totalDrivers": 1}"#;
        assert!(serde_json::from_str::<DailyRecord>(json).is_err());
    }
}
