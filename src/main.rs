// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::reading_repository::ReadingRepository;
use crate::application::room_service::RoomService;
use crate::application::yearly_service::YearlyService;
use crate::infrastructure::config::{load_room_directory, load_service_config};
use crate::infrastructure::file_repository::FileReadingRepository;
use crate::infrastructure::http_repository::HttpReadingRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, health_check, list_areas, list_buildings, list_periods, list_rooms, list_units,
    list_years, resolve_room, yearly_report,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_service_config()?;
    let room_directory = load_room_directory(&config.data.rooms_file)?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn ReadingRepository> = match (&config.data.dir, &config.data.base_url) {
        (Some(dir), _) => Arc::new(FileReadingRepository::new(dir.clone())),
        (None, Some(base_url)) => Arc::new(HttpReadingRepository::new(base_url.clone())),
        (None, None) => anyhow::bail!("config must set either data.dir or data.base_url"),
    };

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository.clone(), config.charts.max_points);
    let yearly_service = YearlyService::new(repository.clone());
    let room_service = RoomService::new(room_directory);

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        yearly_service,
        room_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/periods", get(list_periods))
        .route("/periods/years", get(list_years))
        .route("/dashboards/:period", get(get_dashboard))
        .route("/reports/:year", get(yearly_report))
        .route("/rooms/areas", get(list_areas))
        .route("/rooms/:area/buildings", get(list_buildings))
        .route("/rooms/:area/:building/units", get(list_units))
        .route("/rooms/:area/:building/:unit/rooms", get(list_rooms))
        .route("/rooms/:area/:building/:unit/:room", get(resolve_room))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("starting dorm electricity dashboard on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
