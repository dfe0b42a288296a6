use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use burrow_core::NetworkConfig;
use burrow_core::routing::Preference;
use clap::Parser;
use serde::Deserialize;

use crate::error::StartupError;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "burrow-server", version, about = "Indoor campus routing service")]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "burrow.toml")]
    pub config: PathBuf,
    /// Listen address, overrides `bind` from the config file
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

/// Server configuration as read from TOML.
///
/// ```toml
/// bind = "0.0.0.0:4100"
/// default_preference = "COMPARE_BY_TIME"
///
/// [network]
/// features_path = "data/features.geojson"
///
/// [network.cost]
/// walking_speed = 1.25
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    pub network: NetworkConfig,
    #[serde(default = "default_preference")]
    pub default_preference: Preference,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4100))
}

fn default_preference() -> Preference {
    Preference::TimeOutsideThenTime
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_requests() -> usize {
    64
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, StartupError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = std::fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            [network]
            features_path = "data/features.geojson"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind, default_bind());
        assert_eq!(config.default_preference, Preference::TimeOutsideThenTime);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_concurrent_requests, 64);
        assert_eq!(config.network.buildings_path, None);
        assert_eq!(config.network.cost.walking_speed, 1.25);
    }

    #[test]
    fn full_config_is_read() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind = "0.0.0.0:8080"
            default_preference = "COMPARE_BY_TIME"
            request_timeout_secs = 3
            max_concurrent_requests = 4

            [network]
            features_path = "features.geojson"
            buildings_path = "buildings.geojson"

            [network.cost]
            walking_speed = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.default_preference, Preference::Time);
        assert_eq!(config.max_concurrent_requests, 4);
        assert_eq!(
            config.network.buildings_path,
            Some(PathBuf::from("buildings.geojson"))
        );
        assert_eq!(config.network.cost.walking_speed, 1.0);
        assert_eq!(config.network.cost.floor_ascend_speed, 14.0);
    }

    #[test]
    fn unknown_preference_is_rejected() {
        let result = ServerConfig::from_toml_str(
            r#"
            default_preference = "FASTEST"
            [network]
            features_path = "features.geojson"
            "#,
        );
        assert!(matches!(result, Err(StartupError::ConfigParse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ServerConfig::load(Path::new("/nonexistent/burrow.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/burrow.toml"));
    }
}
