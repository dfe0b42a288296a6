pub use crate::Error;

// Re-export key components
pub use crate::loading::{
    BuildingDirectory, Feature, NetworkConfig, create_network, parse_feature_collection,
};
pub use crate::model::{
    AdjacencyList, BuildingFloor, Coordinate, Edge, Location, Network, TravelMode,
};
pub use crate::routing::{
    Comparator, CostModel, Dijkstra, GraphLocation, Preference, Route, RouteSummary, Step,
};

// Search constants
pub use crate::routing::{FLOOR_ASCEND_SPEED, FLOOR_DESCEND_SPEED, WALKING_SPEED};
