use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::CostModel;

/// Configuration for building a routing network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Path to the navigation `FeatureCollection`
    pub features_path: PathBuf,
    /// Optional separate `FeatureCollection` of building markers.
    /// When absent, building features inside `features_path` are used.
    #[serde(default)]
    pub buildings_path: Option<PathBuf>,
    #[serde(default)]
    pub cost: CostModel,
}

impl NetworkConfig {
    pub fn new(features_path: impl Into<PathBuf>) -> Self {
        Self {
            features_path: features_path.into(),
            buildings_path: None,
            cost: CostModel::default(),
        }
    }
}
