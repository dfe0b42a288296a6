use crate::model::{Location, TravelMode};

/// Rendering of the travel mode of the root record, which was not reached by any edge.
const NO_TRAVEL_MODE: &str = "null";

/// A search-time record of one visited location.
///
/// Distance, time, time outside and the floor counters are running totals from
/// the start of the route. `floor_change` and `path` describe only the step
/// that produced this record.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLocation {
    pub location: Location,
    /// `[lon, lat]` points of the step leading here
    pub path: Vec<[f64; 2]>,
    /// Mode of the edge used to get here, `None` for the start of a route
    pub travel_mode: Option<TravelMode>,
    /// Metres walked since the start
    pub distance: f64,
    /// Seconds since the start
    pub time: f64,
    /// Seconds spent outdoors since the start
    pub time_outside: f64,
    /// Signed floor change of the step leading here
    pub floor_change: i32,
    pub floors_ascended: u32,
    pub floors_descended: u32,
}

impl GraphLocation {
    /// Start record: a single-point path and zeroed accumulators.
    pub fn root(location: Location) -> Self {
        let path = vec![location.coordinate.to_array()];
        Self::new(location, path, None)
    }

    pub fn new(location: Location, path: Vec<[f64; 2]>, travel_mode: Option<TravelMode>) -> Self {
        Self {
            location,
            path,
            travel_mode,
            distance: 0.0,
            time: 0.0,
            time_outside: 0.0,
            floor_change: 0,
            floors_ascended: 0,
            floors_descended: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.travel_mode.is_none()
    }

    /// Whether `next` continues the same corridor, tunnel or stairwell as `self`.
    pub(crate) fn continues_with(&self, next: &GraphLocation) -> bool {
        self.travel_mode.is_some()
            && self.travel_mode == next.travel_mode
            && self.location.building_floor == next.location.building_floor
    }

    /// Folds the following record into this one: the step now ends where
    /// `next` ends and carries its running totals.
    pub(crate) fn absorb(&mut self, next: GraphLocation) {
        let mut points = next.path.into_iter().peekable();
        if self.path.last() == points.peek() {
            points.next();
        }
        self.path.extend(points);

        self.location = next.location;
        self.distance = next.distance;
        self.time = next.time;
        self.time_outside = next.time_outside;
        self.floors_ascended = next.floors_ascended;
        self.floors_descended = next.floors_descended;
        self.floor_change = self.floor_change.saturating_add(next.floor_change);
    }

    /// One-line instruction describing how this record was reached.
    pub fn to_directions_string(&self) -> String {
        let building_floor = self.location.building_floor.to_direction_string();
        match self.travel_mode {
            Some(TravelMode::Open) => format!("Continue into {building_floor}"),
            Some(TravelMode::Door) => format!("Go through the door to {building_floor}"),
            Some(TravelMode::Hallway) => format!("Take the hallway on {building_floor}"),
            Some(TravelMode::Walkway) => format!("Go outside and walk to {building_floor}"),
            Some(TravelMode::Stairs) => match self.floor_change {
                0 => format!("Go through the stairwell to {building_floor}"),
                change => {
                    let direction = if change > 0 { "up" } else { "down" };
                    let floors = change.unsigned_abs();
                    let noun = if floors == 1 { "floor" } else { "floors" };
                    format!("Go {direction} {floors} {noun} to {building_floor}")
                }
            },
            Some(mode @ (TravelMode::Tunnel | TravelMode::Bridge)) => {
                format!("Take the {mode} to {building_floor}")
            }
            None => format!("Take the {NO_TRAVEL_MODE} to {building_floor}"),
        }
    }
}
