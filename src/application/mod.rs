// Application layer - Use cases over the reading repository
pub mod dashboard_service;
pub mod reading_repository;
pub mod room_service;
pub mod yearly_service;
