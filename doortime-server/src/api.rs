use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use doortime_core::Error as CoreError;
use doortime_core::prelude::*;
use serde::{Deserialize, Serialize};
use tower::{BoxError, ServiceBuilder, limit::GlobalConcurrencyLimitLayer, timeout::TimeoutLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::ApiError;

/// Shared, read-only request context
pub struct AppState {
    pub catalog: BuildingCatalog,
    pub provider: Option<Arc<dyn OutdoorDurationProvider>>,
    pub indoor_defaults: IndoorParams,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateBody {
    pub origin: Coordinate,
    pub building_id: String,
    pub target_floor: Floor,
    #[serde(default)]
    pub preferred_entrance_id: Option<String>,
    #[serde(default)]
    pub indoor: IndoorParams,
    #[serde(default)]
    pub outdoor: OutdoorParams,
    #[serde(default)]
    pub precomputed_outdoor_duration_sec: Option<Seconds>,
    #[serde(default)]
    pub indoor_to_core_meters: Option<f64>,
    #[serde(default)]
    pub core_to_dest_meters: Option<f64>,
    #[serde(default)]
    pub departure_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub estimate: EstimateResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<FixedOffset>>,
}

/// `concurrency_limit` is shared by all routes; `Router::layer` clones the
/// middleware per route, so the semaphore must be global.
pub fn router(state: Arc<AppState>, request_timeout: Duration, concurrency_limit: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/buildings", get(list_buildings))
        .route("/estimate", post(estimate))
        .route("/estimate/geojson", post(estimate_geojson))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(GlobalConcurrencyLimitLayer::new(concurrency_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn list_buildings(State(state): State<Arc<AppState>>) -> Json<Vec<Building>> {
    Json(state.catalog.iter().cloned().collect())
}

async fn estimate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EstimateBody>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let departure = body.departure_time;
    let estimate = run_estimate(&state, body).await?;
    let arrival_time = match departure {
        Some(departure) => Some(estimate.arrival_after(departure).ok_or_else(|| {
            CoreError::InvalidParameters(format!(
                "arrival after {departure} is outside the supported date range"
            ))
        })?),
        None => None,
    };

    Ok(Json(EstimateResponse {
        estimate,
        arrival_time,
    }))
}

async fn estimate_geojson(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EstimateBody>,
) -> Result<Response, ApiError> {
    let estimate = run_estimate(&state, body).await?;
    Ok(Json(estimate.to_feature()?).into_response())
}

async fn run_estimate(state: &AppState, body: EstimateBody) -> Result<EstimateResult, ApiError> {
    let building = state
        .catalog
        .get(&body.building_id)
        .ok_or_else(|| ApiError::UnknownBuilding(body.building_id.clone()))?;

    let request = EstimateRequest {
        origin: body.origin,
        building,
        target_floor: body.target_floor,
        preferred_entrance_id: body.preferred_entrance_id,
        indoor: body.indoor.or(state.indoor_defaults),
        outdoor: body.outdoor,
        precomputed_outdoor_duration_sec: body.precomputed_outdoor_duration_sec,
        indoor_to_core_meters: body.indoor_to_core_meters,
        core_to_dest_meters: body.core_to_dest_meters,
    };

    let estimate = estimate_eta(&request, state.provider.as_deref()).await?;
    info!(
        building = %building.id,
        entrance = %estimate.entrance.id,
        floor = request.target_floor,
        total_seconds = estimate.total_seconds,
        "Estimated door-to-floor time"
    );
    Ok(estimate)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(serde_json::json!({ "error": "request timed out" })),
        )
    } else {
        tracing::error!("Unhandled middleware error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "internal error" })),
        )
    }
}
