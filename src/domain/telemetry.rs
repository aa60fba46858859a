// Chart-shaped data handed to the frontend
use super::reading::BalanceLevel;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// A balance tile: the latest value of one circuit with its classification.
#[derive(Debug, Clone)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub level: BalanceLevel,
    /// Meter-gauge fill percentage derived from the classification.
    pub percent: f64,
}

#[derive(Debug, Clone)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, points: Vec<TimeSeriesPoint>) -> Self {
        Self { id, name, points }
    }
}

#[derive(Debug, Clone)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub series: Vec<SeriesData>,
}

/// Downsamples a time series by bucket averaging, keeping the middle point's
/// timestamp per bucket.
pub fn downsample_points(points: Vec<TimeSeriesPoint>, max_points: usize) -> Vec<TimeSeriesPoint> {
    if points.is_empty() || max_points == 0 || points.len() <= max_points {
        return points;
    }

    let bucket_size = (points.len() as f64 / max_points as f64).ceil() as usize;
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in points.chunks(bucket_size) {
        if chunk.is_empty() {
            continue;
        }
        let mid_idx = chunk.len() / 2;
        let avg_value = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;
        downsampled.push(TimeSeriesPoint::new(chunk[mid_idx].time_ms, avg_value));
    }

    downsampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsample_under_budget_is_identity() {
        let points = vec![TimeSeriesPoint::new(0, 1.0), TimeSeriesPoint::new(1, 2.0)];
        assert_eq!(downsample_points(points.clone(), 10), points);
    }

    #[test]
    fn test_downsample_averages_buckets() {
        let points: Vec<_> = (0..6)
            .map(|i| TimeSeriesPoint::new(i, i as f64 * 10.0))
            .collect();
        let downsampled = downsample_points(points, 3);
        assert_eq!(downsampled.len(), 3);
        assert_eq!(downsampled[0], TimeSeriesPoint::new(1, 5.0));
        assert_eq!(downsampled[1], TimeSeriesPoint::new(3, 25.0));
        assert_eq!(downsampled[2], TimeSeriesPoint::new(5, 45.0));
    }

    #[test]
    fn test_downsample_stays_within_budget() {
        let points: Vec<_> = (0..1000).map(|i| TimeSeriesPoint::new(i, 1.0)).collect();
        assert!(downsample_points(points, 150).len() <= 150);
    }
}
