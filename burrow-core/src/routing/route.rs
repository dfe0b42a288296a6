//! Route reconstruction and normalization into user-facing steps.

use serde::Serialize;

use super::GraphLocation;
use super::dijkstra::SearchNode;
use crate::model::{BuildingFloor, TravelMode};

/// Normalized start-to-end sequence of records produced by a search.
///
/// Consecutive records on the same floor with the same mode are merged, and a
/// door-walkway-door excursion through the outdoors becomes one walkway step.
/// The first record is always the start of the route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    graph_locations: Vec<GraphLocation>,
}

impl Route {
    /// Walks parent links from `terminal` back to the root of the search tree.
    pub(crate) fn from_terminal(arena: &[SearchNode], terminal: usize) -> Self {
        let mut chain = Vec::new();
        let mut current = Some(terminal);
        while let Some(index) = current {
            let node = &arena[index];
            chain.push(node.record.clone());
            current = node.parent;
        }
        chain.reverse();
        Self::from_records(chain)
    }

    /// Builds a route from records already in start-to-end order.
    ///
    /// # Panics
    ///
    /// Panics if `records` is empty.
    pub fn from_records(mut records: Vec<GraphLocation>) -> Self {
        assert!(!records.is_empty(), "a route needs at least its start record");
        normalize(&mut records);
        Self {
            graph_locations: records,
        }
    }

    pub fn graph_locations(&self) -> &[GraphLocation] {
        &self.graph_locations
    }

    pub fn len(&self) -> usize {
        self.graph_locations.len()
    }

    /// Always `false`: a route contains at least its start record.
    pub fn is_empty(&self) -> bool {
        self.graph_locations.is_empty()
    }

    pub fn origin(&self) -> &GraphLocation {
        &self.graph_locations[0]
    }

    /// Last record; carries the route totals.
    pub fn destination(&self) -> &GraphLocation {
        &self.graph_locations[self.graph_locations.len() - 1]
    }

    /// Directions after the start record, with metrics for each step alone.
    ///
    /// Records without a travel mode describe no movement and produce no step.
    pub fn steps(&self) -> Vec<Step> {
        self.graph_locations
            .windows(2)
            .filter_map(|pair| match pair {
                [previous, current] => current.travel_mode.map(|mode| (previous, current, mode)),
                _ => None,
            })
            .enumerate()
            .map(|(idx, (previous, current, travel_mode))| Step {
                order: idx + 1,
                directions: current.to_directions_string(),
                travel_mode,
                building_floor: current.location.building_floor.clone(),
                distance: current.distance - previous.distance,
                time: current.time - previous.time,
                time_outside: current.time_outside - previous.time_outside,
                floor_change: current.floor_change,
                path: current.path.clone(),
            })
            .collect()
    }

    pub fn summary(&self) -> RouteSummary {
        let end = self.destination();
        RouteSummary {
            distance: end.distance,
            time: end.time,
            time_outside: end.time_outside,
            floors_ascended: end.floors_ascended,
            floors_descended: end.floors_descended,
        }
    }

    /// Every point of the route, start to end, without repeated joints.
    pub fn full_path(&self) -> Vec<[f64; 2]> {
        let mut path: Vec<[f64; 2]> = Vec::new();
        for point in self.graph_locations.iter().flat_map(|r| r.path.iter()) {
            if path.last() != Some(point) {
                path.push(*point);
            }
        }
        path
    }
}

/// One instruction of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// 1-based position in the directions list
    pub order: usize,
    pub directions: String,
    pub travel_mode: TravelMode,
    pub building_floor: BuildingFloor,
    pub distance: f64,
    pub time: f64,
    pub time_outside: f64,
    pub floor_change: i32,
    pub path: Vec<[f64; 2]>,
}

/// Route totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance: f64,
    pub time: f64,
    pub time_outside: f64,
    pub floors_ascended: u32,
    pub floors_descended: u32,
}

impl RouteSummary {
    /// Whole minutes, rounded to nearest.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn minutes(&self) -> u64 {
        (self.time / 60.0).round() as u64
    }

    /// Two display lines: duration with distance, then floors climbed.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn stats_lines(&self) -> [String; 2] {
        let minutes = match self.minutes() {
            0 => "<1".to_string(),
            m => m.to_string(),
        };
        let metres = group_thousands(self.distance.round() as u64);
        [
            format!("Time: {minutes}min, Distance: {metres}m"),
            format!(
                "{} floors up, {} floors down",
                self.floors_ascended, self.floors_descended
            ),
        ]
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Applies segment merging and outdoor-crossing collapsing until nothing changes.
pub fn normalize(records: &mut Vec<GraphLocation>) {
    loop {
        let merged = merge_segments(records);
        let collapsed = collapse_outdoor_crossings(records);
        if !merged && !collapsed {
            break;
        }
    }
}

fn merge_segments(records: &mut Vec<GraphLocation>) -> bool {
    let before = records.len();
    let mut merged: Vec<GraphLocation> = Vec::with_capacity(before);
    for record in records.drain(..) {
        match merged.last_mut() {
            Some(previous) if previous.continues_with(&record) => previous.absorb(record),
            _ => merged.push(record),
        }
    }
    *records = merged;
    records.len() != before
}

fn collapse_outdoor_crossings(records: &mut Vec<GraphLocation>) -> bool {
    let mut changed = false;
    let mut idx = 0;
    while idx + 3 < records.len() {
        if is_outdoor_crossing(&records[idx..idx + 4]) {
            let entry = records.remove(idx + 3);
            let walk = records.remove(idx + 2);
            let exit = &mut records[idx + 1];
            exit.absorb(walk);
            exit.absorb(entry);
            exit.travel_mode = Some(TravelMode::Walkway);
            changed = true;
        }
        idx += 1;
    }
    changed
}

/// `[inside, door into OUT, walkway, door into a building]`
fn is_outdoor_crossing(window: &[GraphLocation]) -> bool {
    let [before, exit, walk, entry] = window else {
        return false;
    };
    !before.location.building_floor.is_outside()
        && exit.travel_mode == Some(TravelMode::Door)
        && exit.location.building_floor.is_outside()
        && walk.travel_mode == Some(TravelMode::Walkway)
        && entry.travel_mode == Some(TravelMode::Door)
        && !entry.location.building_floor.is_outside()
}
