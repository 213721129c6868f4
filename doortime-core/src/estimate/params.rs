//! Indoor model parameters.
//!
//! Callers pass [`IndoorParams`] with any subset of fields set. Defaults are
//! applied in exactly one place, [`IndoorParams::resolve`], which also
//! validates the numbers before any arithmetic runs on them.

use serde::{Deserialize, Serialize};

use crate::{Error, Seconds};

pub const DEFAULT_ELEVATOR_WAIT_SECONDS: Seconds = 30.0;
/// Elevator wait observed at class changes
pub const BUSY_ELEVATOR_WAIT_SECONDS: Seconds = 70.0;
pub const DEFAULT_ELEVATOR_SEC_PER_FLOOR: Seconds = 2.5;
pub const DEFAULT_ELEVATOR_DOOR_SECONDS: Seconds = 8.0;
pub const DEFAULT_INDOOR_WALK_SPEED_MPS: f64 = 1.1;
/// Doors, entry checks and getting one's bearings
pub const DEFAULT_TRANSITION_PENALTY_SEC: Seconds = 12.0;
pub const DEFAULT_WAYFINDING_PENALTY_SEC: Seconds = 8.0;
/// Vertical speed of a brisk stair climb
pub const STAIR_CLIMB_SPEED_MPS: f64 = 0.30;
/// `auto` switches to the elevator from this many floors up
pub const AUTO_ELEVATOR_MIN_FLOORS: u32 = 5;

/// Configured way of changing floors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalMode {
    #[default]
    Stairs,
    Elevator,
    /// Pick by floor count
    Auto,
}

/// Way of changing floors actually used for an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedVerticalMode {
    Stairs,
    Elevator,
}

impl VerticalMode {
    pub fn resolve(self, floors_to_climb: u32) -> ResolvedVerticalMode {
        match self {
            VerticalMode::Stairs => ResolvedVerticalMode::Stairs,
            VerticalMode::Elevator => ResolvedVerticalMode::Elevator,
            VerticalMode::Auto if floors_to_climb >= AUTO_ELEVATOR_MIN_FLOORS => {
                ResolvedVerticalMode::Elevator
            }
            VerticalMode::Auto => ResolvedVerticalMode::Stairs,
        }
    }
}

/// Caller overrides for the indoor model; unset fields take defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndoorParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_mode: Option<VerticalMode>,
    /// Fixed stair time per floor; physics-based from floor height when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stairs_seconds_per_floor: Option<Seconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_wait_seconds: Option<Seconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_sec_per_floor: Option<Seconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_door_seconds: Option<Seconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor_walk_speed_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_penalty_sec: Option<Seconds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wayfinding_penalty_sec: Option<Seconds>,
}

/// Fully populated indoor parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedIndoorParams {
    pub vertical_mode: VerticalMode,
    pub stairs_seconds_per_floor: Option<Seconds>,
    pub elevator_wait_seconds: Seconds,
    pub elevator_sec_per_floor: Seconds,
    pub elevator_door_seconds: Seconds,
    pub indoor_walk_speed_mps: f64,
    pub transition_penalty_sec: Seconds,
    pub wayfinding_penalty_sec: Seconds,
}

impl Default for ResolvedIndoorParams {
    fn default() -> Self {
        Self {
            vertical_mode: VerticalMode::default(),
            stairs_seconds_per_floor: None,
            elevator_wait_seconds: DEFAULT_ELEVATOR_WAIT_SECONDS,
            elevator_sec_per_floor: DEFAULT_ELEVATOR_SEC_PER_FLOOR,
            elevator_door_seconds: DEFAULT_ELEVATOR_DOOR_SECONDS,
            indoor_walk_speed_mps: DEFAULT_INDOOR_WALK_SPEED_MPS,
            transition_penalty_sec: DEFAULT_TRANSITION_PENALTY_SEC,
            wayfinding_penalty_sec: DEFAULT_WAYFINDING_PENALTY_SEC,
        }
    }
}

impl IndoorParams {
    /// Parameters for busy periods, when elevators queue up
    pub fn peak_hours() -> Self {
        Self {
            elevator_wait_seconds: Some(BUSY_ELEVATOR_WAIT_SECONDS),
            ..Self::default()
        }
    }

    /// Field-wise overlay: values set on `self` win over `fallback`
    #[must_use]
    pub fn or(self, fallback: IndoorParams) -> Self {
        Self {
            vertical_mode: self.vertical_mode.or(fallback.vertical_mode),
            stairs_seconds_per_floor: self
                .stairs_seconds_per_floor
                .or(fallback.stairs_seconds_per_floor),
            elevator_wait_seconds: self
                .elevator_wait_seconds
                .or(fallback.elevator_wait_seconds),
            elevator_sec_per_floor: self
                .elevator_sec_per_floor
                .or(fallback.elevator_sec_per_floor),
            elevator_door_seconds: self
                .elevator_door_seconds
                .or(fallback.elevator_door_seconds),
            indoor_walk_speed_mps: self
                .indoor_walk_speed_mps
                .or(fallback.indoor_walk_speed_mps),
            transition_penalty_sec: self
                .transition_penalty_sec
                .or(fallback.transition_penalty_sec),
            wayfinding_penalty_sec: self
                .wayfinding_penalty_sec
                .or(fallback.wayfinding_penalty_sec),
        }
    }

    /// Applies defaults to every unset field and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if the walking speed is not a
    /// positive finite number or any other value is negative or non-finite.
    pub fn resolve(&self) -> Result<ResolvedIndoorParams, Error> {
        let defaults = ResolvedIndoorParams::default();
        let resolved = ResolvedIndoorParams {
            vertical_mode: self.vertical_mode.unwrap_or(defaults.vertical_mode),
            stairs_seconds_per_floor: self.stairs_seconds_per_floor,
            elevator_wait_seconds: self
                .elevator_wait_seconds
                .unwrap_or(defaults.elevator_wait_seconds),
            elevator_sec_per_floor: self
                .elevator_sec_per_floor
                .unwrap_or(defaults.elevator_sec_per_floor),
            elevator_door_seconds: self
                .elevator_door_seconds
                .unwrap_or(defaults.elevator_door_seconds),
            indoor_walk_speed_mps: self
                .indoor_walk_speed_mps
                .unwrap_or(defaults.indoor_walk_speed_mps),
            transition_penalty_sec: self
                .transition_penalty_sec
                .unwrap_or(defaults.transition_penalty_sec),
            wayfinding_penalty_sec: self
                .wayfinding_penalty_sec
                .unwrap_or(defaults.wayfinding_penalty_sec),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

impl ResolvedIndoorParams {
    fn validate(&self) -> Result<(), Error> {
        if !(self.indoor_walk_speed_mps.is_finite() && self.indoor_walk_speed_mps > 0.0) {
            return Err(Error::InvalidParameters(format!(
                "indoor_walk_speed_mps must be positive, got {}",
                self.indoor_walk_speed_mps
            )));
        }

        let durations = [
            ("stairs_seconds_per_floor", self.stairs_seconds_per_floor),
            ("elevator_wait_seconds", Some(self.elevator_wait_seconds)),
            ("elevator_sec_per_floor", Some(self.elevator_sec_per_floor)),
            ("elevator_door_seconds", Some(self.elevator_door_seconds)),
            ("transition_penalty_sec", Some(self.transition_penalty_sec)),
            ("wayfinding_penalty_sec", Some(self.wayfinding_penalty_sec)),
        ];
        for (name, value) in durations {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidParameters(format!(
                        "{name} must be a non-negative number, got {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}
