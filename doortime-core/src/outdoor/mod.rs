//! Outdoor leg of the trip.
//!
//! The estimator never talks to a routing service directly; it asks an
//! [`OutdoorDurationProvider`] for the walking time between the origin and
//! the chosen entrance.

mod mapbox;
mod straight_line;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coordinate, Seconds};

pub use mapbox::{MapboxConfig, MapboxDirections};
pub use straight_line::StraightLineWalking;

/// Longest outdoor leg accepted from a caller or a provider: one week
pub const MAX_OUTDOOR_SECONDS: Seconds = 7.0 * 24.0 * 3600.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider is missing credentials or configuration
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// Upstream answered but had no usable route
    #[error("route not found: {0}")]
    RouteNotFound(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Travel profile understood by the directions service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    #[default]
    Walking,
    Cycling,
    Driving,
    DrivingTraffic,
}

impl RoutingProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingProfile::Walking => "walking",
            RoutingProfile::Cycling => "cycling",
            RoutingProfile::Driving => "driving",
            RoutingProfile::DrivingTraffic => "driving-traffic",
        }
    }
}

impl std::fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request outdoor routing options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutdoorParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<RoutingProfile>,
}

impl OutdoorParams {
    pub fn profile(&self) -> RoutingProfile {
        self.profile.unwrap_or_default()
    }
}

/// Source of outdoor route durations.
///
/// Implementations own their transport policy (timeouts, cancellation).
/// A returned duration is always a real measurement; failures must be
/// reported as errors rather than as a zero duration.
#[async_trait]
pub trait OutdoorDurationProvider: Send + Sync {
    async fn walking_duration(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        params: &OutdoorParams,
    ) -> Result<Seconds, ProviderError>;
}
