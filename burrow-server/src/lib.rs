//! HTTP front end for the burrow routing engine.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::build_router;
pub use config::{Args, ServerConfig};
pub use error::{ApiError, StartupError};
pub use state::AppState;
