// Dashboard domain model
use super::stats::Stats;
use super::telemetry::{ChartData, TileData};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    /// `None` when the period holds too few readings for statistics; the
    /// charts still render from whatever exists.
    pub stats: Option<Stats>,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
}
