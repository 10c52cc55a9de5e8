// Repository trait for daily driver counts
use crate::domain::trend::DailyRecord;
use async_trait::async_trait;

#[async_trait]
pub trait TrendRepository: Send + Sync {
    /// Daily driver totals for the last `days` days, oldest first
    async fn daily_driver_counts(&self, days: u32) -> anyhow::Result<Vec<DailyRecord>>;
}
