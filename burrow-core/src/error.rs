use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid feature #{index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Unknown routing preference: {0}")]
    UnknownPreference(String),
    #[error("No entry point for {building_code} floor {floor}")]
    UnknownEntryPoint { building_code: String, floor: String },
}
