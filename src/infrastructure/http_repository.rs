// Reading repository over a static site
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::application::reading_repository::{ReadingRepository, RepositoryError};
use crate::domain::reading::Reading;

/// Fetches the recorder's published layout over HTTP: `{base}/time.json` for
/// the period index, `{base}/{period}.json` per period. The base URL points
/// at the same static site the charting frontend is served from.
#[derive(Debug, Clone)]
pub struct HttpReadingRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpReadingRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, file_name: &str) -> Result<T, RepositoryError> {
        let url = format!("{}/{}", self.base_url, file_name);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("{url}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RepositoryError::PeriodNotFound(file_name.to_string()));
        }
        if !response.status().is_success() {
            return Err(RepositoryError::Unavailable(format!(
                "{url} returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("{url}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| RepositoryError::Malformed(url, e))
    }
}

#[async_trait]
impl ReadingRepository for HttpReadingRepository {
    async fn list_periods(&self) -> Result<Vec<String>, RepositoryError> {
        self.fetch_json("time.json").await
    }

    async fn fetch_period(&self, period: &str) -> Result<Vec<Reading>, RepositoryError> {
        self.fetch_json(&format!("{period}.json"))
            .await
            .map_err(|e| match e {
                RepositoryError::PeriodNotFound(_) => {
                    RepositoryError::PeriodNotFound(period.to_string())
                }
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let repository = HttpReadingRepository::new("https://meter.example/data/".to_string());
        assert_eq!(repository.base_url, "https://meter.example/data");
    }
}
