// Room lookup service - Use case for the room-to-meter-ID finder
use crate::domain::rooms::{AreaInfo, RoomDirectory, RoomMeters};

#[derive(Clone)]
pub struct RoomService {
    directory: RoomDirectory,
}

impl RoomService {
    pub fn new(directory: RoomDirectory) -> Self {
        Self { directory }
    }

    pub fn areas(&self) -> Vec<AreaInfo> {
        self.directory.areas()
    }

    pub fn buildings(&self, area: &str) -> Option<Vec<String>> {
        self.directory.buildings(area)
    }

    pub fn units(&self, area: &str, building: &str) -> Option<Vec<String>> {
        self.directory.units(area, building)
    }

    pub fn rooms(&self, area: &str, building: &str, unit: &str) -> Option<Vec<String>> {
        self.directory.rooms(area, building, unit)
    }

    pub fn resolve(
        &self,
        area: &str,
        building: &str,
        unit: &str,
        room: &str,
    ) -> Option<RoomMeters> {
        self.directory.resolve(area, building, unit, room)
    }
}
