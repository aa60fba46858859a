// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::room_service::RoomService;
use crate::application::yearly_service::YearlyService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub yearly_service: YearlyService,
    pub room_service: RoomService,
}
