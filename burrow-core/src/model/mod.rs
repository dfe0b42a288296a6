//! Data model for indoor routing
//!
//! Contains the node identity types, edges, the adjacency structure built
//! from navigation features and the network bundling it with entry points.

pub mod adjacency;
pub mod edge;
pub mod location;
mod network;

pub use adjacency::{AdjacencyList, line_length};
pub use edge::{Edge, TravelMode};
pub use location::{BuildingFloor, Coordinate, Location, OUTSIDE_BUILDING_CODE};
pub use network::Network;
