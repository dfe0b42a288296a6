//! Node identity primitives: coordinates, building floors and their composite.

use std::fmt;
use std::hash::{Hash, Hasher};

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// Building code of the pseudo-building used for everything outdoors.
pub const OUTSIDE_BUILDING_CODE: &str = "OUT";

/// A geographic position, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    /// Builds a coordinate from a GeoJSON-style `[lon, lat]` pair.
    pub fn new(lon_lat: [f64; 2]) -> Self {
        Self {
            longitude: lon_lat[0],
            latitude: lon_lat[1],
        }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Coord {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

/// A specific floor of a specific building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingFloor {
    pub building_code: String,
    pub floor: String,
}

impl BuildingFloor {
    pub fn new(building_code: impl Into<String>, floor: impl Into<String>) -> Self {
        Self {
            building_code: building_code.into(),
            floor: floor.into(),
        }
    }

    /// `true` for the outdoors pseudo-building.
    pub fn is_outside(&self) -> bool {
        self.building_code == OUTSIDE_BUILDING_CODE
    }

    /// Human form used in directions, e.g. `MC floor 2`.
    pub fn to_direction_string(&self) -> String {
        format!("{} floor {}", self.building_code, self.floor)
    }
}

/// Serializes as `{building_code}|{floor}`, the key used by entry-point lookups.
impl fmt::Display for BuildingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.building_code, self.floor)
    }
}

/// A graph node: a coordinate on a given building floor.
///
/// Equality is exact on both coordinate components and both floor components.
/// The canonical key (see the `Display` impl) is `{lat}|{lon}|{building_code}|{floor}`.
#[derive(Debug, Clone)]
pub struct Location {
    pub coordinate: Coordinate,
    pub building_floor: BuildingFloor,
}

impl Location {
    pub fn new(coordinate: Coordinate, building_floor: BuildingFloor) -> Self {
        Self {
            coordinate,
            building_floor,
        }
    }

    /// Canonical string key of this location.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate && self.building_floor == other.building_floor
    }
}

// Coordinates are validated finite at construction of the graph, so `==` on
// them is reflexive for every location that can reach a map.
impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds -0.0 into 0.0 to stay consistent with `==`.
        (self.coordinate.latitude + 0.0).to_bits().hash(state);
        (self.coordinate.longitude + 0.0).to_bits().hash(state);
        self.building_floor.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.coordinate.latitude + 0.0,
            self.coordinate.longitude + 0.0,
            self.building_floor.building_code,
            self.building_floor.floor
        )
    }
}
