use std::sync::Arc;

use burrow_core::Network;
use burrow_core::routing::Preference;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub network: Arc<Network>,
    pub default_preference: Preference,
}

impl AppState {
    pub fn new(network: Network, default_preference: Preference) -> Self {
        Self {
            network: Arc::new(network),
            default_preference,
        }
    }
}
