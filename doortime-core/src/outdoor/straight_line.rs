//! Offline fallback: great-circle distance at an assumed walking pace.
//!
//! Ignores the street network, so it underestimates around large blocks;
//! the detour factor compensates on average.

use async_trait::async_trait;

use super::{OutdoorDurationProvider, OutdoorParams, ProviderError};
use crate::{Coordinate, Seconds, model::haversine_distance};

const DEFAULT_WALK_SPEED_MPS: f64 = 1.4;
const DEFAULT_DETOUR_FACTOR: f64 = 1.25;

#[derive(Debug, Clone, Copy)]
pub struct StraightLineWalking {
    pub speed_mps: f64,
    /// Ratio of street distance to straight-line distance
    pub detour_factor: f64,
}

impl Default for StraightLineWalking {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_WALK_SPEED_MPS,
            detour_factor: DEFAULT_DETOUR_FACTOR,
        }
    }
}

impl StraightLineWalking {
    pub fn new(speed_mps: f64, detour_factor: f64) -> Self {
        Self {
            speed_mps,
            detour_factor,
        }
    }

    pub fn duration_between(&self, origin: &Coordinate, destination: &Coordinate) -> Seconds {
        haversine_distance(origin, destination) * self.detour_factor / self.speed_mps
    }
}

#[async_trait]
impl OutdoorDurationProvider for StraightLineWalking {
    async fn walking_duration(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        _params: &OutdoorParams,
    ) -> Result<Seconds, ProviderError> {
        if !(self.speed_mps.is_finite() && self.speed_mps > 0.0)
            || !(self.detour_factor.is_finite() && self.detour_factor >= 1.0)
        {
            return Err(ProviderError::Unavailable(format!(
                "straight-line walking needs speed > 0 and detour factor >= 1, got {} m/s and {}",
                self.speed_mps, self.detour_factor
            )));
        }
        Ok(self.duration_between(&origin, &destination))
    }
}
