//! Building and floor selections that can be used as route endpoints.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Serialize;

use super::Feature;
use crate::Error;
use crate::model::{BuildingFloor, Coordinate, Location};

/// A `{value, label}` pair for pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Entry points keyed by building and floor.
///
/// Every floor of a building enters the graph at the building marker point.
#[derive(Debug, Clone, Default)]
pub struct BuildingDirectory {
    entry_points: HashMap<BuildingFloor, Location>,
    floors: BTreeMap<String, Vec<String>>,
}

impl BuildingDirectory {
    pub fn from_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Self {
        let mut directory = Self::default();
        for feature in features {
            if let Feature::Building {
                building_code,
                floors,
                coordinate,
            } = feature
            {
                directory.insert(building_code, floors, *coordinate);
            }
        }
        for floors in directory.floors.values_mut() {
            floors.sort();
            floors.dedup();
        }
        directory
    }

    fn insert(&mut self, building_code: &str, floors: &[String], coordinate: [f64; 2]) {
        let known = self.floors.entry(building_code.to_string()).or_default();
        for floor in floors {
            let building_floor = BuildingFloor::new(building_code, floor.as_str());
            let location = Location::new(Coordinate::new(coordinate), building_floor.clone());
            self.entry_points.insert(building_floor, location);
            known.push(floor.clone());
        }
    }

    /// Graph location for a building/floor selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntryPoint`] if no building feature lists that floor.
    pub fn entry_point(&self, building_code: &str, floor: &str) -> Result<&Location, Error> {
        self.entry_points
            .get(&BuildingFloor::new(building_code, floor))
            .ok_or_else(|| Error::UnknownEntryPoint {
                building_code: building_code.to_string(),
                floor: floor.to_string(),
            })
    }

    pub fn entry_point_of(&self, building_floor: &BuildingFloor) -> Result<&Location, Error> {
        self.entry_point(&building_floor.building_code, &building_floor.floor)
    }

    /// Building code to its floors, both sorted.
    pub fn floor_options(&self) -> &BTreeMap<String, Vec<String>> {
        &self.floors
    }

    pub fn building_options(&self) -> Vec<SelectOption> {
        self.floors
            .keys()
            .map(|code| SelectOption {
                value: code.clone(),
                label: code.clone(),
            })
            .collect()
    }

    /// Floors of `building_code`; empty when the building is unknown or not given.
    pub fn floor_options_for(&self, building_code: Option<&str>) -> Vec<SelectOption> {
        building_code
            .and_then(|code| self.floors.get(code))
            .map(|floors| {
                floors
                    .iter()
                    .map(|floor| SelectOption {
                        value: floor.clone(),
                        label: floor.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entry_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_points.is_empty()
    }
}
