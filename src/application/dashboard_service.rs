// Dashboard service - Use case for building a period's dashboard
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::application::reading_repository::{ReadingRepository, RepositoryError};
use crate::domain::dashboard::Dashboard;
use crate::domain::interpolate::interpolate_missing;
use crate::domain::reading::{classify_balance, Circuit, Reading};
use crate::domain::stats::calculate_stats;
use crate::domain::telemetry::{downsample_points, ChartData, SeriesData, TileData, TimeSeriesPoint};
use crate::domain::timeparse::parse_reading_time;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ReadingRepository>,
    max_chart_points: usize,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn ReadingRepository>, max_chart_points: usize) -> Self {
        Self {
            repository,
            max_chart_points,
        }
    }

    pub async fn list_periods(&self) -> Result<Vec<String>, RepositoryError> {
        self.repository.list_periods().await
    }

    /// Builds the full dashboard for one period: normalized readings, the
    /// statistics snapshot, balance tiles and chart series.
    pub async fn get_dashboard(
        &self,
        period: &str,
        now: NaiveDateTime,
    ) -> Result<Dashboard, RepositoryError> {
        let raw = self.repository.fetch_period(period).await?;

        // interpolation runs on file order, time-series use on sorted order
        let mut readings = interpolate_missing(&raw);
        readings.sort_by_key(|r| parse_reading_time(&r.time, now));

        let stats = calculate_stats(&readings, now);
        let tiles = build_tiles(&readings);
        let charts = build_charts(&readings, now, self.max_chart_points);

        Ok(Dashboard {
            title: format!("Electricity balance {period}"),
            stats,
            tiles,
            charts,
        })
    }
}

fn build_tiles(readings: &[Reading]) -> Vec<TileData> {
    let Some(latest) = readings.last() else {
        return Vec::new();
    };
    [
        (Circuit::Light, "light", "Lighting"),
        (Circuit::Ac, "ac", "Air conditioning"),
    ]
    .into_iter()
    .map(|(circuit, id, title)| {
        let value = latest.balance(circuit).unwrap_or(0.0);
        let (level, percent) = classify_balance(value);
        TileData {
            id: id.to_string(),
            title: title.to_string(),
            unit: "kWh".to_string(),
            value,
            level,
            percent,
        }
    })
    .collect()
}

fn build_charts(readings: &[Reading], now: NaiveDateTime, max_points: usize) -> Vec<ChartData> {
    [
        (Circuit::Light, "light", "Lighting balance"),
        (Circuit::Ac, "ac", "Air conditioning balance"),
    ]
    .into_iter()
    .map(|(circuit, id, title)| {
        let points: Vec<TimeSeriesPoint> = readings
            .iter()
            .map(|r| {
                TimeSeriesPoint::new(
                    parse_reading_time(&r.time, now).and_utc().timestamp_millis(),
                    r.balance(circuit).unwrap_or(0.0),
                )
            })
            .collect();
        ChartData {
            id: id.to_string(),
            title: title.to_string(),
            unit: "kWh".to_string(),
            series: vec![SeriesData::new(
                id.to_string(),
                title.to_string(),
                downsample_points(points, max_points),
            )],
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedRepository {
        readings: Vec<Reading>,
    }

    #[async_trait]
    impl ReadingRepository for FixedRepository {
        async fn list_periods(&self) -> Result<Vec<String>, RepositoryError> {
            Ok(vec!["2025-06".to_string()])
        }

        async fn fetch_period(&self, _period: &str) -> Result<Vec<Reading>, RepositoryError> {
            Ok(self.readings.clone())
        }
    }

    fn reading(time: &str, light: Option<f64>, ac: Option<f64>) -> Reading {
        Reading {
            time: time.to_string(),
            light_balance: light,
            ac_balance: ac,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_normalizes_and_computes() {
        // out of chronological order, with a gap to interpolate
        let repository = Arc::new(FixedRepository {
            readings: vec![
                reading("06-02 08:00", Some(70.0), Some(40.0)),
                reading("06-03 08:00", None, Some(38.0)),
                reading("06-01 08:00", Some(80.0), Some(42.0)),
            ],
        });
        let service = DashboardService::new(repository, 150);
        let dashboard = service.get_dashboard("2025-06", now()).await.unwrap();

        let stats = dashboard.stats.unwrap();
        assert_eq!(stats.last_update, "06-03 08:00");

        let light = &dashboard.charts[0].series[0].points;
        assert_eq!(light.len(), 3);
        // sorted chronologically despite file order
        assert!(light.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
        // the gap interpolates by file position (between 70 and 80), not by
        // time, then sorts into place
        assert_eq!(light[2].value, 75.0);

        assert_eq!(dashboard.tiles.len(), 2);
        assert_eq!(dashboard.tiles[0].value, 75.0);
        assert_eq!(dashboard.tiles[1].value, 38.0);
    }

    #[tokio::test]
    async fn test_dashboard_without_enough_readings_has_no_stats() {
        let repository = Arc::new(FixedRepository {
            readings: vec![reading("06-01", Some(80.0), Some(42.0))],
        });
        let service = DashboardService::new(repository, 150);
        let dashboard = service.get_dashboard("2025-06", now()).await.unwrap();
        assert!(dashboard.stats.is_none());
        assert_eq!(dashboard.tiles.len(), 2);
        assert_eq!(dashboard.charts[0].series[0].points.len(), 1);
    }
}
