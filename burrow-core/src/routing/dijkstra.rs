//! Label-setting shortest path search over the navigation graph.

mod state;

pub(crate) use state::SearchNode;

use std::collections::BinaryHeap;

use hashbrown::HashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use self::state::State;
use super::{Comparator, GraphLocation, Preference, Route, compare_by_time};
use crate::Error;
use crate::model::{AdjacencyList, Edge, Location, TravelMode};

/// Walking speed in metres per second.
pub const WALKING_SPEED: f64 = 1.25;
/// Seconds needed to climb one floor.
pub const FLOOR_ASCEND_SPEED: f64 = 14.0;
/// Seconds needed to go down one floor.
pub const FLOOR_DESCEND_SPEED: f64 = 14.0;

/// Speeds used to turn edges into travel time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Metres per second on any horizontal edge
    pub walking_speed: f64,
    /// Seconds per floor going up
    pub floor_ascend_speed: f64,
    /// Seconds per floor going down
    pub floor_descend_speed: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            walking_speed: WALKING_SPEED,
            floor_ascend_speed: FLOOR_ASCEND_SPEED,
            floor_descend_speed: FLOOR_DESCEND_SPEED,
        }
    }
}

/// Cost of traversing a single edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeCost {
    pub distance: f64,
    pub time: f64,
    pub time_outside: f64,
    pub floors_ascended: u32,
    pub floors_descended: u32,
}

impl CostModel {
    /// Checks that every speed is finite and usable as a divisor/multiplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the walking speed is not strictly positive or a
    /// floor speed is negative.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.walking_speed.is_finite() && self.walking_speed > 0.0) {
            return Err(Error::InvalidData(format!(
                "walking speed must be positive, got {}",
                self.walking_speed
            )));
        }
        for (name, value) in [
            ("floor ascend speed", self.floor_ascend_speed),
            ("floor descend speed", self.floor_descend_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidData(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn edge_cost(&self, edge: &Edge) -> EdgeCost {
        match edge.travel_mode {
            TravelMode::Stairs => {
                let change = edge.floor_change;
                let floors = f64::from(change.unsigned_abs());
                let time = if change > 0 {
                    floors * self.floor_ascend_speed
                } else {
                    floors * self.floor_descend_speed
                };
                EdgeCost {
                    time,
                    floors_ascended: change.max(0).unsigned_abs(),
                    floors_descended: change.min(0).unsigned_abs(),
                    ..EdgeCost::default()
                }
            }
            mode => {
                let time = edge.length / self.walking_speed;
                EdgeCost {
                    distance: edge.length,
                    time,
                    time_outside: if mode.is_outdoors() { time } else { 0.0 },
                    ..EdgeCost::default()
                }
            }
        }
    }
}

/// Route search over a borrowed, read-only graph.
///
/// Every call owns its own queue and finalized set, so one `Dijkstra` can
/// serve many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Dijkstra<'a> {
    adjacency: &'a AdjacencyList,
    cost_model: CostModel,
}

impl<'a> Dijkstra<'a> {
    pub fn new(adjacency: &'a AdjacencyList) -> Self {
        Self {
            adjacency,
            cost_model: CostModel::default(),
        }
    }

    /// For cost models that already passed [`CostModel::validate`].
    pub(crate) fn with_validated_cost_model(adjacency: &'a AdjacencyList, cost_model: CostModel) -> Self {
        Self {
            adjacency,
            cost_model,
        }
    }

    /// Replaces the default speeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the cost model fails [`CostModel::validate`].
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Result<Self, Error> {
        cost_model.validate()?;
        self.cost_model = cost_model;
        Ok(self)
    }

    pub fn adjacency(&self) -> &'a AdjacencyList {
        self.adjacency
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Cheapest route from `start` to `end` under `comparator` (by time when `None`).
    ///
    /// Returns `None` when `end` cannot be reached. Identical endpoints give a
    /// single-record route.
    pub fn calculate_route(
        &self,
        start: &Location,
        end: &Location,
        comparator: Option<Comparator>,
    ) -> Option<Route> {
        let comparator = comparator.unwrap_or(compare_by_time);

        if start == end {
            return Some(Route::from_records(vec![GraphLocation::root(start.clone())]));
        }

        // Only finalized nodes enter the arena, so parents are always stable indices.
        let mut arena: Vec<SearchNode> = Vec::new();
        let mut heap = BinaryHeap::new();
        let mut sequence = 0;
        heap.push(State::new(
            SearchNode {
                record: GraphLocation::root(start.clone()),
                parent: None,
            },
            sequence,
            comparator,
        ));
        let mut finalized: HashSet<Location> = HashSet::new();

        while let Some(state) = heap.pop() {
            let node = state.node;
            if finalized.contains(&node.record.location) {
                continue;
            }
            finalized.insert(node.record.location.clone());
            let current = arena.len();
            arena.push(node);
            let record = &arena[current].record;

            if record.location == *end {
                debug!(
                    "Route {start} -> {end} found after finalizing {} locations ({} queued, {} pushed)",
                    finalized.len(),
                    heap.len(),
                    sequence + 1
                );
                return Some(Route::from_terminal(&arena, current));
            }

            for edge in self.adjacency.edges_of(&record.location) {
                if finalized.contains(&edge.end) {
                    continue;
                }
                sequence += 1;
                heap.push(State::new(
                    SearchNode {
                        record: self.extend(record, edge),
                        parent: Some(current),
                    },
                    sequence,
                    comparator,
                ));
            }
        }

        debug!(
            "No route {start} -> {end}: exhausted {} locations",
            finalized.len()
        );
        None
    }

    /// [`Dijkstra::calculate_route`] with a named ordering.
    pub fn route_with_preference(
        &self,
        start: &Location,
        end: &Location,
        preference: Preference,
    ) -> Option<Route> {
        self.calculate_route(start, end, Some(preference.comparator()))
    }

    fn extend(&self, parent: &GraphLocation, edge: &Edge) -> GraphLocation {
        let cost = self.cost_model.edge_cost(edge);
        GraphLocation {
            location: edge.end.clone(),
            path: edge.coordinates.clone(),
            travel_mode: Some(edge.travel_mode),
            distance: parent.distance + cost.distance,
            time: parent.time + cost.time,
            time_outside: parent.time_outside + cost.time_outside,
            floor_change: edge.floor_change,
            floors_ascended: parent.floors_ascended.saturating_add(cost.floors_ascended),
            floors_descended: parent.floors_descended.saturating_add(cost.floors_descended),
        }
    }
}
