//! HTTP handlers and router construction.

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use burrow_core::routing::{
    ComparatorOption, Preference, RouteSummary, Step, comparator_options,
};
use burrow_core::{BuildingFloor, loading::SelectOption};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the router with tracing, CORS, timeout and concurrency limits.
///
/// `max_concurrent_requests` is shared by every route.
pub fn build_router(
    state: AppState,
    request_timeout: Duration,
    max_concurrent_requests: usize,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/buildings", get(buildings))
        .route("/preferences", get(preferences))
        .route("/route", post(route))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(GlobalConcurrencyLimitLayer::new(max_concurrent_requests)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        tracing::error!("Unhandled middleware error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
pub struct BuildingEntry {
    pub value: String,
    pub label: String,
    pub floors: Vec<SelectOption>,
}

async fn buildings(State(state): State<AppState>) -> Json<Vec<BuildingEntry>> {
    let directory = &state.network.directory;
    let entries = directory
        .building_options()
        .into_iter()
        .map(|option| BuildingEntry {
            floors: directory.floor_options_for(Some(&option.value)),
            value: option.value,
            label: option.label,
        })
        .collect();
    Json(entries)
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub options: Vec<ComparatorOption>,
    pub default: &'static str,
}

async fn preferences(State(state): State<AppState>) -> Json<PreferencesResponse> {
    Json(PreferencesResponse {
        options: comparator_options(),
        default: state.default_preference.key(),
    })
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start: BuildingFloor,
    pub end: BuildingFloor,
    /// Comparator key; the server default when absent
    #[serde(default)]
    pub preference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub preference: &'static str,
    pub summary: RouteSummary,
    pub stats: [String; 2],
    pub steps: Vec<Step>,
    pub geometry: FeatureCollection,
}

async fn route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let preference = match request.preference.as_deref() {
        Some(key) => key.parse::<Preference>()?,
        None => state.default_preference,
    };

    let network = state.network.clone();
    let (start, end) = (request.start, request.end);
    let found = tokio::task::spawn_blocking(move || {
        network
            .route(&start, &end, preference)
            .map(|route| (route, start, end))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    let (route, start, end) = found;
    let route = route.ok_or(ApiError::NoRoute { start, end })?;
    let summary = route.summary();
    tracing::debug!(
        "Route with {} steps, {:.0}s, {:.0}m",
        route.len() - 1,
        summary.time,
        summary.distance
    );

    Ok(Json(RouteResponse {
        preference: preference.key(),
        stats: summary.stats_lines(),
        summary,
        steps: route.steps(),
        geometry: route.to_geojson()?,
    }))
}
