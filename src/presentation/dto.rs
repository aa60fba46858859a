// Response shapes for the HTTP API
use serde::Serialize;

use crate::domain::dashboard::Dashboard;
use crate::domain::rooms::{AreaInfo, RoomMeters};
use crate::domain::stats::{DaysLeft, Stats};
use crate::domain::telemetry::{ChartData, SeriesData, TileData};
use crate::domain::yearly::{DailyConsumption, MonthlyConsumption, YearlyReport};

/// Consumption snapshot with every numeric field pre-rendered for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub light_trend: String,
    pub ac_trend: String,
    /// Display form of the trend: consumption carries a "-" prefix, a
    /// recharge a "+" prefix.
    pub light_trend_display: String,
    pub ac_trend_display: String,
    pub light_yesterday_trend: String,
    pub ac_yesterday_trend: String,
    pub max_light: String,
    pub min_light: String,
    pub max_ac: String,
    pub min_ac: String,
    pub light_avg_daily: String,
    pub ac_avg_daily: String,
    pub light_days_left: DaysLeftDto,
    pub ac_days_left: DaysLeftDto,
    pub last_update: String,
    pub yesterday_total_consumption: String,
}

/// An integer day count, or `"∞"` when the balance never runs out.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DaysLeftDto {
    Days(i64),
    Unbounded(&'static str),
}

impl From<DaysLeft> for DaysLeftDto {
    fn from(days_left: DaysLeft) -> Self {
        match days_left {
            DaysLeft::Days(days) => DaysLeftDto::Days(days),
            DaysLeft::Unbounded => DaysLeftDto::Unbounded("∞"),
        }
    }
}

impl From<&Stats> for StatsDto {
    fn from(stats: &Stats) -> Self {
        Self {
            light_trend: format!("{:.1}", stats.light_trend),
            ac_trend: format!("{:.1}", stats.ac_trend),
            light_trend_display: format_trend(stats.light_trend),
            ac_trend_display: format_trend(stats.ac_trend),
            light_yesterday_trend: format!("{:.1}", stats.light_yesterday_trend),
            ac_yesterday_trend: format!("{:.1}", stats.ac_yesterday_trend),
            max_light: format!("{:.1}", stats.max_light),
            min_light: format!("{:.1}", stats.min_light),
            max_ac: format!("{:.1}", stats.max_ac),
            min_ac: format!("{:.1}", stats.min_ac),
            light_avg_daily: format!("{:.1}", stats.light_avg_daily),
            ac_avg_daily: format!("{:.1}", stats.ac_avg_daily),
            light_days_left: stats.light_days_left.into(),
            ac_days_left: stats.ac_days_left.into(),
            last_update: stats.last_update.clone(),
            yesterday_total_consumption: format!("{:.1}", stats.yesterday_total_consumption),
        }
    }
}

/// Renders a balance delta the way the dashboard shows it: a non-negative
/// delta is consumption ("-"), a negative one a recharge ("+").
pub fn format_trend(delta: f64) -> String {
    if delta >= 0.0 {
        format!("-{:.1}", delta)
    } else {
        format!("+{:.1}", delta.abs())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDto {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub level: &'static str,
    pub percent: f64,
}

impl From<&TileData> for TileDto {
    fn from(tile: &TileData) -> Self {
        Self {
            id: tile.id.clone(),
            title: tile.title.clone(),
            unit: tile.unit.clone(),
            value: tile.value,
            level: tile.level.as_str(),
            percent: tile.percent,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDto {
    pub id: String,
    pub name: String,
    /// `[epoch_millis, balance]` pairs, chronologically sorted.
    pub points: Vec<(i64, f64)>,
}

impl From<&SeriesData> for SeriesDto {
    fn from(series: &SeriesData) -> Self {
        Self {
            id: series.id.clone(),
            name: series.name.clone(),
            points: series.points.iter().map(|p| (p.time_ms, p.value)).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDto {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub series: Vec<SeriesDto>,
}

impl From<&ChartData> for ChartDto {
    fn from(chart: &ChartData) -> Self {
        Self {
            id: chart.id.clone(),
            title: chart.title.clone(),
            unit: chart.unit.clone(),
            series: chart.series.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub title: String,
    pub stats: Option<StatsDto>,
    pub tiles: Vec<TileDto>,
    pub charts: Vec<ChartDto>,
}

impl From<&Dashboard> for DashboardDto {
    fn from(dashboard: &Dashboard) -> Self {
        Self {
            title: dashboard.title.clone(),
            stats: dashboard.stats.as_ref().map(Into::into),
            tiles: dashboard.tiles.iter().map(Into::into).collect(),
            charts: dashboard.charts.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDto {
    pub date: String,
    pub light: f64,
    pub ac: f64,
    pub filled: bool,
}

impl From<&DailyConsumption> for DailyDto {
    fn from(day: &DailyConsumption) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            light: round2(day.light),
            ac: round2(day.ac),
            filled: day.filled,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDto {
    pub month: String,
    pub light: f64,
    pub ac: f64,
}

impl From<&MonthlyConsumption> for MonthlyDto {
    fn from(month: &MonthlyConsumption) -> Self {
        Self {
            month: month.month.clone(),
            light: round1(month.light),
            ac: round1(month.ac),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakDto {
    pub date: String,
    pub total: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeDto {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReportDto {
    pub year: i32,
    pub total: String,
    pub total_light: String,
    pub total_ac: String,
    pub light_percent: String,
    pub ac_percent: String,
    pub peak: Option<PeakDto>,
    pub date_range: Option<DateRangeDto>,
    pub daily: Vec<DailyDto>,
    pub monthly: Vec<MonthlyDto>,
}

impl From<&YearlyReport> for YearlyReportDto {
    fn from(report: &YearlyReport) -> Self {
        Self {
            year: report.year,
            total: format!("{:.2}", report.total()),
            total_light: format!("{:.2}", report.total_light),
            total_ac: format!("{:.2}", report.total_ac),
            light_percent: format!("{:.1}", report.light_percent()),
            ac_percent: format!("{:.1}", report.ac_percent()),
            peak: report.peak.map(|peak| PeakDto {
                date: peak.date.format("%Y-%m-%d").to_string(),
                total: format!("{:.2}", peak.total),
            }),
            date_range: report.date_range().map(|(from, to)| DateRangeDto {
                from: from.format("%Y-%m-%d").to_string(),
                to: to.format("%Y-%m-%d").to_string(),
            }),
            daily: report.daily.iter().map(Into::into).collect(),
            monthly: report.monthly.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaDto {
    pub id: String,
    pub name: String,
}

impl From<AreaInfo> for AreaDto {
    fn from(area: AreaInfo) -> Self {
        Self {
            id: area.id,
            name: area.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetersDto {
    pub light_id: Option<String>,
    pub ac_id: Option<String>,
}

impl From<RoomMeters> for RoomMetersDto {
    fn from(meters: RoomMeters) -> Self {
        Self {
            light_id: meters.light_id,
            ac_id: meters.ac_id,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
