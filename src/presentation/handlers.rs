// HTTP request handlers
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Local;

use crate::presentation::app_state::AppState;
use crate::presentation::dto::{
    AreaDto, DashboardDto, RoomMetersDto, YearlyReportDto,
};
use crate::presentation::error::AppError;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List available period keys
pub async fn list_periods(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.dashboard_service.list_periods().await?))
}

/// List years covered by the time index, newest first
pub async fn list_years(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.yearly_service.list_years().await?))
}

/// Dashboard for one period: stats snapshot, tiles and chart series
pub async fn get_dashboard(
    Path(period): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardDto>, AppError> {
    let now = Local::now().naive_local();
    let dashboard = state.dashboard_service.get_dashboard(&period, now).await?;
    Ok(Json(DashboardDto::from(&dashboard)))
}

/// Yearly consumption report
pub async fn yearly_report(
    Path(year): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<YearlyReportDto>, AppError> {
    match state.yearly_service.yearly_report(year).await? {
        Some(report) => Ok(Json(YearlyReportDto::from(&report))),
        None => Err(AppError::NotFound(format!("no data recorded for {year}"))),
    }
}

pub async fn list_areas(State(state): State<Arc<AppState>>) -> Json<Vec<AreaDto>> {
    Json(state.room_service.areas().into_iter().map(Into::into).collect())
}

pub async fn list_buildings(
    Path(area): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    state
        .room_service
        .buildings(&area)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("unknown area `{area}`")))
}

pub async fn list_units(
    Path((area, building)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    state
        .room_service
        .units(&area, &building)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("unknown building `{building}`")))
}

pub async fn list_rooms(
    Path((area, building, unit)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    state
        .room_service
        .rooms(&area, &building, &unit)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("unknown unit `{unit}`")))
}

/// Meter ids for one room; a circuit without a meter resolves to null
pub async fn resolve_room(
    Path((area, building, unit, room)): Path<(String, String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomMetersDto>, AppError> {
    state
        .room_service
        .resolve(&area, &building, &unit, &room)
        .map(|meters| Json(meters.into()))
        .ok_or_else(|| AppError::NotFound(format!("unknown room `{room}`")))
}
