//! Graph edges and travel modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Location;
use crate::Error;

/// Category of a traversable connection. Drives both the cost model and the
/// wording of a direction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Hallway,
    Bridge,
    Tunnel,
    Walkway,
    Door,
    Open,
    Stairs,
}

impl TravelMode {
    pub const ALL: [TravelMode; 7] = [
        TravelMode::Hallway,
        TravelMode::Bridge,
        TravelMode::Tunnel,
        TravelMode::Walkway,
        TravelMode::Door,
        TravelMode::Open,
        TravelMode::Stairs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Hallway => "hallway",
            TravelMode::Bridge => "bridge",
            TravelMode::Tunnel => "tunnel",
            TravelMode::Walkway => "walkway",
            TravelMode::Door => "door",
            TravelMode::Open => "open",
            TravelMode::Stairs => "stairs",
        }
    }

    /// Modes that come from `LineString` features.
    pub fn is_line(self) -> bool {
        matches!(
            self,
            TravelMode::Hallway | TravelMode::Bridge | TravelMode::Tunnel | TravelMode::Walkway
        )
    }

    /// Walkway time counts as time spent outdoors.
    pub fn is_outdoors(self) -> bool {
        self == TravelMode::Walkway
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::InvalidData(format!("unknown travel mode '{s}'")))
    }
}

/// A directed connection between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub start: Location,
    pub end: Location,
    /// Length in metres
    pub length: f64,
    /// Signed number of floors climbed when traversing start -> end
    pub floor_change: i32,
    pub travel_mode: TravelMode,
    /// Raw `[lon, lat]` points traced by the edge, start to end
    pub coordinates: Vec<[f64; 2]>,
}

impl Edge {
    pub fn new(
        start: Location,
        end: Location,
        length: f64,
        floor_change: i32,
        travel_mode: TravelMode,
        coordinates: Vec<[f64; 2]>,
    ) -> Self {
        Self {
            start,
            end,
            length,
            floor_change,
            travel_mode,
            coordinates,
        }
    }

    /// The same connection walked the other way.
    pub fn reversed(&self) -> Self {
        let mut coordinates = self.coordinates.clone();
        coordinates.reverse();
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
            length: self.length,
            floor_change: -self.floor_change,
            travel_mode: self.travel_mode,
            coordinates,
        }
    }
}
