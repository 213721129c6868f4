use chrono::{DateTime, TimeDelta, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};

use super::entrance::select_entrance;
use super::params::ResolvedVerticalMode;
use super::vertical::{floors_to_climb, vertical_seconds};
use super::IndoorParams;
use crate::{
    Error, Floor, Seconds,
    model::{Building, Coordinate, Entrance, building::is_valid_dimension},
    outdoor::{MAX_OUTDOOR_SECONDS, OutdoorDurationProvider, OutdoorParams, ProviderError},
};

/// One door-to-floor estimate to compute
#[derive(Debug, Clone)]
pub struct EstimateRequest<'a> {
    pub origin: Coordinate,
    pub building: &'a Building,
    pub target_floor: Floor,
    pub preferred_entrance_id: Option<String>,
    pub indoor: IndoorParams,
    pub outdoor: OutdoorParams,
    /// Skips the provider when set to a non-zero value
    pub precomputed_outdoor_duration_sec: Option<Seconds>,
    /// Overrides the building's entrance-to-core distance
    pub indoor_to_core_meters: Option<f64>,
    /// Overrides the building's core-to-destination distance
    pub core_to_dest_meters: Option<f64>,
}

impl<'a> EstimateRequest<'a> {
    pub fn new(origin: Coordinate, building: &'a Building, target_floor: Floor) -> Self {
        Self {
            origin,
            building,
            target_floor,
            preferred_entrance_id: None,
            indoor: IndoorParams::default(),
            outdoor: OutdoorParams::default(),
            precomputed_outdoor_duration_sec: None,
            indoor_to_core_meters: None,
            core_to_dest_meters: None,
        }
    }

    #[must_use]
    pub fn with_preferred_entrance(mut self, id: impl Into<String>) -> Self {
        self.preferred_entrance_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_indoor(mut self, indoor: IndoorParams) -> Self {
        self.indoor = indoor;
        self
    }

    #[must_use]
    pub fn with_outdoor(mut self, outdoor: OutdoorParams) -> Self {
        self.outdoor = outdoor;
        self
    }

    #[must_use]
    pub fn with_precomputed_outdoor_duration(mut self, seconds: Seconds) -> Self {
        self.precomputed_outdoor_duration_sec = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_horizontal_legs(mut self, indoor_to_core: f64, core_to_dest: f64) -> Self {
        self.indoor_to_core_meters = Some(indoor_to_core);
        self.core_to_dest_meters = Some(core_to_dest);
        self
    }
}

/// Itemized durations that add up to the total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub outdoor_sec: Seconds,
    pub indoor_transition_sec: Seconds,
    pub indoor_horizontal_sec: Seconds,
    pub vertical_sec: Seconds,
    pub wayfinding_sec: Seconds,
}

impl Breakdown {
    pub fn total(&self) -> Seconds {
        self.outdoor_sec
            + self.indoor_transition_sec
            + self.indoor_horizontal_sec
            + self.vertical_sec
            + self.wayfinding_sec
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub total_seconds: Seconds,
    /// Whole minutes, rounded up
    pub total_minutes: u32,
    pub breakdown: Breakdown,
    pub building_id: String,
    pub entrance: Entrance,
    pub vertical_mode: ResolvedVerticalMode,
    pub floors_to_climb: u32,
    pub origin: Coordinate,
}

impl EstimateResult {
    /// Expected arrival at the destination floor when leaving at `departure`.
    ///
    /// `None` when the arrival falls outside the representable date range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn arrival_after<Tz: TimeZone>(&self, departure: DateTime<Tz>) -> Option<DateTime<Tz>> {
        let millis = (self.total_seconds * 1000.0).round();
        if !millis.is_finite() {
            return None;
        }
        // Float-to-int casts saturate; try_milliseconds rejects what is left
        let delta = TimeDelta::try_milliseconds(millis as i64)?;
        departure.checked_add_signed(delta)
    }
}

/// Estimates the door-to-floor travel time for `request`.
///
/// The outdoor leg comes from `precomputed_outdoor_duration_sec` when it is
/// set and non-zero, otherwise from `provider`. The provider call is the only
/// suspension point; nothing is retried.
///
/// # Errors
///
/// - [`Error::InvalidParameters`] for invalid indoor parameters or overrides, or a
///   total too large to express in minutes
/// - [`Error::InvalidBuildingData`] if the building has no entrances or bad dimensions
/// - [`Error::Configuration`] if the outdoor leg is needed but no usable provider exists
/// - [`Error::Provider`] if the provider fails
pub async fn estimate_eta(
    request: &EstimateRequest<'_>,
    provider: Option<&dyn OutdoorDurationProvider>,
) -> Result<EstimateResult, Error> {
    let params = request.indoor.resolve()?;
    let building = request.building;

    let entrance = select_entrance(
        &request.origin,
        building,
        request.preferred_entrance_id.as_deref(),
    )?;

    let indoor_to_core = match request.indoor_to_core_meters {
        Some(meters) => check_override("indoor_to_core_meters", meters)?,
        None => check_dimension(building, "avg_indoor_to_core_meters", building.indoor_to_core_meters())?,
    };
    let core_to_dest = match request.core_to_dest_meters {
        Some(meters) => check_override("core_to_dest_meters", meters)?,
        None => check_dimension(building, "avg_core_to_dest_meters", building.core_to_dest_meters())?,
    };
    let indoor_horizontal_sec = (indoor_to_core + core_to_dest) / params.indoor_walk_speed_mps;

    let floor_height = check_dimension(building, "floor_height_meters", building.floor_height())?;
    let floors = floors_to_climb(entrance.entrance_floor, request.target_floor);
    let (vertical_sec, vertical_mode) = vertical_seconds(floors, floor_height, &params);

    // Pure parts are settled before going to the network
    let outdoor_sec = outdoor_seconds(request, entrance.location, provider).await?;

    let breakdown = Breakdown {
        outdoor_sec,
        indoor_transition_sec: params.transition_penalty_sec,
        indoor_horizontal_sec,
        vertical_sec,
        wayfinding_sec: params.wayfinding_penalty_sec,
    };
    let total_seconds = breakdown.total();
    let total_minutes = ceil_minutes(total_seconds)?;

    debug!(
        "Estimate for {} floor {} via '{}': {total_seconds:.1}s",
        building.id, request.target_floor, entrance.id
    );

    Ok(EstimateResult {
        total_seconds,
        total_minutes,
        breakdown,
        building_id: building.id.clone(),
        entrance: entrance.clone(),
        vertical_mode,
        floors_to_climb: floors,
        origin: request.origin,
    })
}

async fn outdoor_seconds(
    request: &EstimateRequest<'_>,
    destination: Coordinate,
    provider: Option<&dyn OutdoorDurationProvider>,
) -> Result<Seconds, Error> {
    // Zero means "not measured", never "already there"
    if let Some(seconds) = request
        .precomputed_outdoor_duration_sec
        .filter(|&seconds| seconds != 0.0)
    {
        if !(seconds.is_finite() && seconds > 0.0 && seconds <= MAX_OUTDOOR_SECONDS) {
            return Err(Error::InvalidParameters(format!(
                "precomputed_outdoor_duration_sec must be in (0, {MAX_OUTDOOR_SECONDS}], got {seconds}"
            )));
        }
        debug!("Using precomputed outdoor duration of {seconds:.1}s");
        return Ok(seconds);
    }

    let provider = provider.ok_or_else(|| {
        Error::Configuration(
            "no outdoor duration provider is configured and no precomputed outdoor duration was supplied"
                .to_string(),
        )
    })?;

    let seconds = provider
        .walking_duration(request.origin, destination, &request.outdoor)
        .await?;
    if !(seconds.is_finite() && (0.0..=MAX_OUTDOOR_SECONDS).contains(&seconds)) {
        return Err(Error::Provider(ProviderError::RouteNotFound(format!(
            "provider returned invalid duration {seconds}"
        ))));
    }
    Ok(seconds)
}

fn check_override(name: &str, meters: f64) -> Result<f64, Error> {
    if meters.is_finite() && meters >= 0.0 {
        Ok(meters)
    } else {
        Err(Error::InvalidParameters(format!(
            "{name} must be a non-negative distance, got {meters}"
        )))
    }
}

fn check_dimension(building: &Building, name: &str, meters: f64) -> Result<f64, Error> {
    if is_valid_dimension(meters) {
        Ok(meters)
    } else {
        Err(Error::InvalidBuildingData(format!(
            "building {} has non-positive {name}: {meters}",
            building.id
        )))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn ceil_minutes(total_seconds: Seconds) -> Result<u32, Error> {
    let minutes = (total_seconds / 60.0).ceil();
    if minutes.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&minutes) {
        Ok(minutes as u32)
    } else {
        Err(Error::InvalidParameters(format!(
            "total of {total_seconds}s cannot be expressed in whole minutes"
        )))
    }
}
