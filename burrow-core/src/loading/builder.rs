use std::fs;
use std::path::Path;

use log::{info, warn};

use super::config::NetworkConfig;
use super::features::{Feature, parse_feature_collection};
use super::BuildingDirectory;
use crate::Error;
use crate::model::{AdjacencyList, Network};

/// Creates a routing network based on the provided configuration
///
/// # Errors
///
/// Returns an error if a file is missing or unreadable, a feature is
/// malformed, or the cost model is invalid
pub fn create_network(config: &NetworkConfig) -> Result<Network, Error> {
    validate_config(config)?;

    info!(
        "Processing navigation features: {}",
        config.features_path.display()
    );
    let features = read_features(&config.features_path)?;
    let adjacency = AdjacencyList::build(&features);

    let directory = match &config.buildings_path {
        Some(path) => {
            info!("Processing building features: {}", path.display());
            BuildingDirectory::from_features(&read_features(path)?)
        }
        None => BuildingDirectory::from_features(&features),
    };

    if directory.is_empty() {
        warn!("No building features found - routes can only be requested by location");
    }
    info!(
        "Network created: {} locations, {} edges, {} entry points",
        adjacency.location_count(),
        adjacency.edge_count(),
        directory.len()
    );

    Network::new(adjacency, directory, config.cost)
}

fn read_features(path: &Path) -> Result<Vec<Feature>, Error> {
    let json = fs::read_to_string(path)?;
    parse_feature_collection(&json)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    let paths = std::iter::once(&config.features_path).chain(config.buildings_path.as_ref());
    for path in paths {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Feature file not found: {}", path.display()),
            )));
        }
    }

    config.cost.validate()
}
