// Room-to-meter-ID directory
use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Deserialize;

/// Campus gardens in their customary listing order. Buildings outside any
/// garden sort ahead of them.
const GARDEN_ORDER: [&str; 4] = ["柳园", "荷园", "菊园", "松园"];

/// Unit-name markers for the two circuits, with a shared fallback unit that
/// meters a whole room.
const LIGHT_UNIT_MARKER: &str = "照明";
const AC_UNIT_MARKER: &str = "空调";
const SHARED_UNIT_NAME: &str = "房间用电";

/// Campuses where every room carries a single meter serving both circuits.
const SINGLE_METER_AREAS: [&str; 1] = ["105"];

/// The full lookup table, keyed by area id.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDirectory(pub BTreeMap<String, Area>);

#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub name: String,
    pub buildings: BTreeMap<String, Building>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Building {
    pub units: BTreeMap<String, Unit>,
}

/// Rooms and meter ids are parallel, index-aligned arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct Unit {
    pub rooms: Vec<String>,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaInfo {
    pub id: String,
    pub name: String,
}

/// Meter ids resolved for one room. A circuit with no meter resolves to
/// `None` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMeters {
    pub light_id: Option<String>,
    pub ac_id: Option<String>,
}

impl RoomDirectory {
    pub fn areas(&self) -> Vec<AreaInfo> {
        self.0
            .iter()
            .map(|(id, area)| AreaInfo {
                id: id.clone(),
                name: area.name.clone(),
            })
            .collect()
    }

    /// Building names of an area, garden precedence first, then embedded
    /// number, then lexicographic.
    pub fn buildings(&self, area: &str) -> Option<Vec<String>> {
        let area = self.0.get(area)?;
        let mut names: Vec<String> = area.buildings.keys().cloned().collect();
        names.sort_by(|a, b| building_order(a, b));
        Some(names)
    }

    pub fn units(&self, area: &str, building: &str) -> Option<Vec<String>> {
        let building = self.0.get(area)?.buildings.get(building)?;
        let mut names: Vec<String> = building.units.keys().cloned().collect();
        names.sort_by(|a, b| numeric_then_lexical(a, b));
        Some(names)
    }

    pub fn rooms(&self, area: &str, building: &str, unit: &str) -> Option<Vec<String>> {
        let unit = self.0.get(area)?.buildings.get(building)?.units.get(unit)?;
        let mut rooms = unit.rooms.clone();
        rooms.sort_by(|a, b| numeric_then_lexical(a, b));
        Some(rooms)
    }

    /// Resolves a room to its meter ids.
    ///
    /// In single-meter areas the selected unit's own id serves both circuits.
    /// Elsewhere the light id comes from a unit whose name marks the lighting
    /// circuit and the AC id from one marking air conditioning, either
    /// falling back to the building's shared room-power unit.
    ///
    /// Returns `None` when the area, building or unit does not exist.
    pub fn resolve(&self, area: &str, building: &str, unit: &str, room: &str) -> Option<RoomMeters> {
        let building_entry = self.0.get(area)?.buildings.get(building)?;
        let selected = building_entry.units.get(unit)?;

        if SINGLE_METER_AREAS.contains(&area) {
            let id = meter_id(selected, room);
            return Some(RoomMeters {
                light_id: id.clone(),
                ac_id: id,
            });
        }

        let light_unit = circuit_unit(building_entry, LIGHT_UNIT_MARKER);
        let ac_unit = circuit_unit(building_entry, AC_UNIT_MARKER);

        Some(RoomMeters {
            light_id: light_unit.and_then(|u| meter_id(u, room)),
            ac_id: ac_unit.and_then(|u| meter_id(u, room)),
        })
    }
}

/// First unit whose name carries the circuit marker, else the shared
/// room-power unit.
fn circuit_unit<'a>(building: &'a Building, marker: &str) -> Option<&'a Unit> {
    building
        .units
        .iter()
        .find(|(name, _)| name.contains(marker))
        .map(|(_, unit)| unit)
        .or_else(|| building.units.get(SHARED_UNIT_NAME))
}

/// Meter id at the room's index in the unit's parallel arrays. Empty id
/// slots count as missing.
fn meter_id(unit: &Unit, room: &str) -> Option<String> {
    let index = unit.rooms.iter().position(|r| r == room)?;
    unit.ids.get(index).filter(|id| !id.is_empty()).cloned()
}

fn building_order(a: &str, b: &str) -> Ordering {
    let garden_a = garden_rank(a);
    let garden_b = garden_rank(b);
    garden_a
        .cmp(&garden_b)
        .then_with(|| numeric_then_lexical(a, b))
}

fn garden_rank(name: &str) -> i32 {
    GARDEN_ORDER
        .iter()
        .position(|garden| name.starts_with(garden))
        .map(|i| i as i32)
        .unwrap_or(-1)
}

fn numeric_then_lexical(a: &str, b: &str) -> Ordering {
    embedded_number(a)
        .cmp(&embedded_number(b))
        .then_with(|| a.cmp(b))
}

/// First run of ASCII digits in the name; names with none rank as zero.
fn embedded_number(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(rooms: &[&str], ids: &[&str]) -> Unit {
        Unit {
            rooms: rooms.iter().map(|s| s.to_string()).collect(),
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn directory() -> RoomDirectory {
        let mut units = BTreeMap::new();
        units.insert("1单元照明".to_string(), unit(&["101", "102"], &["L-101", "L-102"]));
        units.insert("1单元空调".to_string(), unit(&["101", "102"], &["A-101", ""]));
        let building = Building { units };

        let mut shared_units = BTreeMap::new();
        shared_units.insert("房间用电".to_string(), unit(&["201"], &["R-201"]));
        let shared_building = Building { units: shared_units };

        let mut buildings = BTreeMap::new();
        buildings.insert("柳园10号楼".to_string(), building);
        buildings.insert("柳园2号楼".to_string(), shared_building.clone());
        buildings.insert("荷园1号楼".to_string(), shared_building.clone());
        buildings.insert("东区实验楼".to_string(), shared_building.clone());

        let mut areas = BTreeMap::new();
        areas.insert(
            "101".to_string(),
            Area {
                name: "主校区".to_string(),
                buildings,
            },
        );

        let mut floor_units = BTreeMap::new();
        floor_units.insert("2层".to_string(), unit(&["201", "202"], &["S-201", "S-202"]));
        let mut single_buildings = BTreeMap::new();
        single_buildings.insert(
            "1号楼".to_string(),
            Building {
                units: floor_units,
            },
        );
        areas.insert(
            "105".to_string(),
            Area {
                name: "洛阳校区".to_string(),
                buildings: single_buildings,
            },
        );

        RoomDirectory(areas)
    }

    #[test]
    fn test_building_ordering() {
        let dir = directory();
        let buildings = dir.buildings("101").unwrap();
        // no garden first, then garden order, numeric within a garden
        assert_eq!(
            buildings,
            vec!["东区实验楼", "柳园2号楼", "柳园10号楼", "荷园1号楼"]
        );
    }

    #[test]
    fn test_resolve_circuit_units() {
        let dir = directory();
        let meters = dir
            .resolve("101", "柳园10号楼", "1单元照明", "101")
            .unwrap();
        assert_eq!(meters.light_id.as_deref(), Some("L-101"));
        assert_eq!(meters.ac_id.as_deref(), Some("A-101"));
    }

    #[test]
    fn test_resolve_missing_ac_id() {
        let dir = directory();
        // room 102 has an empty AC id slot
        let meters = dir
            .resolve("101", "柳园10号楼", "1单元照明", "102")
            .unwrap();
        assert_eq!(meters.light_id.as_deref(), Some("L-102"));
        assert_eq!(meters.ac_id, None);
    }

    #[test]
    fn test_resolve_shared_unit_fallback() {
        let dir = directory();
        let meters = dir.resolve("101", "荷园1号楼", "房间用电", "201").unwrap();
        assert_eq!(meters.light_id.as_deref(), Some("R-201"));
        assert_eq!(meters.ac_id.as_deref(), Some("R-201"));
    }

    #[test]
    fn test_resolve_single_meter_area() {
        let dir = directory();
        let meters = dir.resolve("105", "1号楼", "2层", "202").unwrap();
        assert_eq!(meters.light_id.as_deref(), Some("S-202"));
        assert_eq!(meters.ac_id.as_deref(), Some("S-202"));
    }

    #[test]
    fn test_resolve_unknown_path() {
        let dir = directory();
        assert!(dir.resolve("999", "柳园10号楼", "1单元照明", "101").is_none());
        assert!(dir.resolve("101", "柳园99号楼", "1单元照明", "101").is_none());

        // known unit, unknown room: resolves with no ids
        let meters = dir
            .resolve("101", "柳园10号楼", "1单元照明", "999")
            .unwrap();
        assert_eq!(meters, RoomMeters { light_id: None, ac_id: None });
    }

    #[test]
    fn test_room_numeric_sort() {
        let mut units = BTreeMap::new();
        units.insert(
            "房间用电".to_string(),
            unit(&["1010", "203", "101"], &["a", "b", "c"]),
        );
        let mut buildings = BTreeMap::new();
        buildings.insert("楼".to_string(), Building { units });
        let mut areas = BTreeMap::new();
        areas.insert(
            "101".to_string(),
            Area {
                name: "区".to_string(),
                buildings,
            },
        );
        let dir = RoomDirectory(areas);
        assert_eq!(
            dir.rooms("101", "楼", "房间用电").unwrap(),
            vec!["101", "203", "1010"]
        );
    }
}
