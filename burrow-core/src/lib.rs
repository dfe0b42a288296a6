//! Indoor campus routing: graph construction from navigation features,
//! shortest path search and turn-by-turn route assembly.

mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{NetworkConfig, create_network};
pub use model::{AdjacencyList, BuildingFloor, Coordinate, Location, Network};
pub use routing::{Dijkstra, Preference, Route};
