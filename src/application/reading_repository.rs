// Repository trait for reading-data access
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::reading::Reading;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("period `{0}` not found")]
    PeriodNotFound(String),
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed data in `{0}`: {1}")]
    Malformed(String, #[source] serde_json::Error),
}

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// List the available period keys (`"YYYY-MM"`) from the time index.
    async fn list_periods(&self) -> Result<Vec<String>, RepositoryError>;

    /// Fetch all readings recorded for one period, in file order. File order
    /// is not guaranteed chronological.
    async fn fetch_period(&self, period: &str) -> Result<Vec<Reading>, RepositoryError>;
}
