use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use burrow_core::{BuildingFloor, Error};
use serde_json::json;
use thiserror::Error;

/// Failures reported to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No entry point for {building_code} floor {floor}")]
    UnknownEntryPoint { building_code: String, floor: String },
    #[error("Unknown routing preference: {0}")]
    UnknownPreference(String),
    #[error("No route from {start} to {end}")]
    NoRoute { start: BuildingFloor, end: BuildingFloor },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownEntryPoint { .. } => StatusCode::NOT_FOUND,
            ApiError::UnknownPreference(_) => StatusCode::BAD_REQUEST,
            ApiError::NoRoute { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        match value {
            Error::UnknownEntryPoint {
                building_code,
                floor,
            } => ApiError::UnknownEntryPoint {
                building_code,
                floor,
            },
            Error::UnknownPreference(key) => ApiError::UnknownPreference(key),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failures while starting the server.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error(transparent)]
    Network(#[from] Error),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_statuses() {
        let missing: ApiError = Error::UnknownEntryPoint {
            building_code: "MC".to_string(),
            floor: "9".to_string(),
        }
        .into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let preference: ApiError = Error::UnknownPreference("FASTEST".to_string()).into();
        assert_eq!(preference.status(), StatusCode::BAD_REQUEST);

        let other: ApiError = Error::InvalidData("boom".to_string()).into();
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn no_route_is_unprocessable() {
        let err = ApiError::NoRoute {
            start: BuildingFloor::new("MC", "1"),
            end: BuildingFloor::new("DC", "1"),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "No route from MC|1 to DC|1");
    }
}
