//! Static building metadata: buildings and their street entrances

use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::Floor;

/// Storey height assumed when a building does not specify one
pub const DEFAULT_FLOOR_HEIGHT_METERS: f64 = 3.8;
/// Average walk from an entrance to the stair/elevator core
pub const DEFAULT_INDOOR_TO_CORE_METERS: f64 = 35.0;
/// Average walk from the stair/elevator landing to the destination room
pub const DEFAULT_CORE_TO_DEST_METERS: f64 = 35.0;

/// Floor heights and walking distances must be finite and strictly positive
pub(crate) fn is_valid_dimension(meters: f64) -> bool {
    meters.is_finite() && meters > 0.0
}

/// Street entrance of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    /// Floor the entrance opens onto; not always 1 on sloped sites
    pub entrance_floor: Floor,
}

/// Destination building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    /// At least one entrance is expected
    pub entrances: Vec<Entrance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_height_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_indoor_to_core_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_core_to_dest_meters: Option<f64>,
}

impl Building {
    pub fn new(id: impl Into<String>, name: impl Into<String>, entrances: Vec<Entrance>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entrances,
            floor_height_meters: None,
            avg_indoor_to_core_meters: None,
            avg_core_to_dest_meters: None,
        }
    }

    pub fn floor_height(&self) -> f64 {
        self.floor_height_meters
            .unwrap_or(DEFAULT_FLOOR_HEIGHT_METERS)
    }

    pub fn indoor_to_core_meters(&self) -> f64 {
        self.avg_indoor_to_core_meters
            .unwrap_or(DEFAULT_INDOOR_TO_CORE_METERS)
    }

    pub fn core_to_dest_meters(&self) -> f64 {
        self.avg_core_to_dest_meters
            .unwrap_or(DEFAULT_CORE_TO_DEST_METERS)
    }

    pub fn entrance(&self, id: &str) -> Option<&Entrance> {
        self.entrances.iter().find(|entrance| entrance.id == id)
    }
}

impl Entrance {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinate,
        entrance_floor: Floor,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            entrance_floor,
        }
    }
}
