// Reading repository over a local data directory
use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::application::reading_repository::{ReadingRepository, RepositoryError};
use crate::domain::reading::Reading;

/// Reads the recorder's static layout from disk: `{dir}/time.json` for the
/// period index, `{dir}/{period}.json` per period.
#[derive(Debug, Clone)]
pub struct FileReadingRepository {
    data_dir: PathBuf,
}

impl FileReadingRepository {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    async fn read_json<T: DeserializeOwned>(&self, file_name: &str) -> Result<T, RepositoryError> {
        let path = self.data_dir.join(file_name);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::Malformed(path.display().to_string(), e))
    }
}

/// Period keys come from the time index and address files on disk; anything
/// but `YYYY-MM`-shaped input is rejected before it touches a path.
fn is_valid_period(period: &str) -> bool {
    !period.is_empty()
        && period
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[async_trait]
impl ReadingRepository for FileReadingRepository {
    async fn list_periods(&self) -> Result<Vec<String>, RepositoryError> {
        self.read_json("time.json").await
    }

    async fn fetch_period(&self, period: &str) -> Result<Vec<Reading>, RepositoryError> {
        if !is_valid_period(period) {
            return Err(RepositoryError::PeriodNotFound(period.to_string()));
        }
        let file_name = format!("{period}.json");
        if !self.data_dir.join(&file_name).is_file() {
            return Err(RepositoryError::PeriodNotFound(period.to_string()));
        }
        self.read_json(&file_name).await
    }
}
