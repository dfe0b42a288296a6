//! Route search and presentation
//!
//! [`Dijkstra`] explores the navigation graph under a [`Comparator`], and
//! [`Route`] turns the winning chain of records into directions.

pub mod comparator;
pub mod dijkstra;
mod graph_location;
pub mod itinerary;
pub mod route;

pub use comparator::{
    COMPARATOR_OPTIONS, Comparator, ComparatorOption, Preference, comparator_options, comparators,
    compare_by_time, compare_by_time_outside_then_time,
};
pub use dijkstra::{
    CostModel, Dijkstra, EdgeCost, FLOOR_ASCEND_SPEED, FLOOR_DESCEND_SPEED, WALKING_SPEED,
};
pub use graph_location::GraphLocation;
pub use route::{Route, RouteSummary, Step};
