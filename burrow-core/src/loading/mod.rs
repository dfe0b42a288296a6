//! This module is responsible for loading navigation features and building
//! the routing network.

mod builder;
pub mod buildings;
mod config;
pub mod features;

pub use builder::create_network;
pub use buildings::{BuildingDirectory, SelectOption};
pub use config::NetworkConfig;
pub use features::{Feature, StairConnection, feature_collection_from_value, parse_feature_collection};
