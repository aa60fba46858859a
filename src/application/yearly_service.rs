// Yearly report service - Use case for the year summary view
use std::sync::Arc;

use crate::application::reading_repository::{ReadingRepository, RepositoryError};
use crate::domain::yearly::{aggregate_yearly, TaggedReading, YearlyReport};

#[derive(Clone)]
pub struct YearlyService {
    repository: Arc<dyn ReadingRepository>,
}

impl YearlyService {
    pub fn new(repository: Arc<dyn ReadingRepository>) -> Self {
        Self { repository }
    }

    /// Distinct years present in the time index, newest first.
    pub async fn list_years(&self) -> Result<Vec<String>, RepositoryError> {
        let periods = self.repository.list_periods().await?;
        let mut years: Vec<String> = periods
            .iter()
            .filter_map(|p| p.split('-').next())
            .map(|y| y.to_string())
            .collect();
        years.sort();
        years.dedup();
        years.reverse();
        Ok(years)
    }

    /// Aggregates a year's months into the yearly report.
    ///
    /// Month fetches are independent and run concurrently; a month that
    /// fails to load is skipped with a warning and the rest proceed. Returns
    /// `Ok(None)` when the year has no months or no month could be loaded.
    pub async fn yearly_report(&self, year: i32) -> Result<Option<YearlyReport>, RepositoryError> {
        let periods = self.repository.list_periods().await?;
        let prefix = year.to_string();
        let months: Vec<String> = periods
            .into_iter()
            .filter(|p| p.starts_with(&prefix))
            .collect();
        if months.is_empty() {
            return Ok(None);
        }

        let fetches = months.into_iter().map(|period| {
            let repository = self.repository.clone();
            async move {
                let result = repository.fetch_period(&period).await;
                (period, result)
            }
        });

        let mut records = Vec::new();
        for (period, result) in futures::future::join_all(fetches).await {
            match result {
                Ok(readings) => {
                    records.extend(readings.into_iter().map(|reading| TaggedReading {
                        period: period.clone(),
                        reading,
                    }));
                }
                Err(e) => {
                    tracing::warn!(%period, error = %e, "skipping month that failed to load");
                }
            }
        }

        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(aggregate_yearly(&records, year)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::Reading;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MonthlyRepository {
        months: HashMap<String, Vec<Reading>>,
    }

    #[async_trait]
    impl ReadingRepository for MonthlyRepository {
        async fn list_periods(&self) -> Result<Vec<String>, RepositoryError> {
            let mut periods: Vec<String> = self.months.keys().cloned().collect();
            periods.sort();
            // a listed month that fails to load
            periods.push("2025-07".to_string());
            Ok(periods)
        }

        async fn fetch_period(&self, period: &str) -> Result<Vec<Reading>, RepositoryError> {
            self.months
                .get(period)
                .cloned()
                .ok_or_else(|| RepositoryError::PeriodNotFound(period.to_string()))
        }
    }

    fn reading(time: &str, light: f64) -> Reading {
        Reading {
            time: time.to_string(),
            light_balance: Some(light),
            ac_balance: Some(0.0),
        }
    }

    fn repository() -> Arc<MonthlyRepository> {
        let mut months = HashMap::new();
        months.insert(
            "2025-05".to_string(),
            vec![reading("05-31 08:00", 90.0)],
        );
        months.insert(
            "2025-06".to_string(),
            vec![reading("06-01 08:00", 80.0), reading("06-01 20:00", 76.0)],
        );
        months.insert("2024-12".to_string(), vec![reading("12-31 08:00", 10.0)]);
        Arc::new(MonthlyRepository { months })
    }

    #[tokio::test]
    async fn test_list_years_newest_first() {
        let service = YearlyService::new(repository());
        assert_eq!(service.list_years().await.unwrap(), vec!["2025", "2024"]);
    }

    #[tokio::test]
    async fn test_report_skips_failed_month() {
        let service = YearlyService::new(repository());
        let report = service.yearly_report(2025).await.unwrap().unwrap();
        // 2025-07 failed to load but the report still covers May and June:
        // 05-31 carries into 06-01, 06-01 closes on its own last reading
        assert_eq!(report.total_light, 14.0);
        assert_eq!(report.daily.len(), 2);
    }

    #[tokio::test]
    async fn test_report_none_for_absent_year() {
        let service = YearlyService::new(repository());
        assert!(service.yearly_report(2019).await.unwrap().is_none());
    }
}
