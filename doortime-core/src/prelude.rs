pub use crate::EARTH_RADIUS_METERS;

// Re-export key components
pub use crate::estimate::{
    Breakdown, EstimateRequest, EstimateResult, IndoorParams, ResolvedVerticalMode, VerticalMode,
    estimate_eta,
};
pub use crate::loading::BuildingCatalog;
pub use crate::model::{Building, Coordinate, Entrance};
pub use crate::outdoor::{
    MapboxConfig, MapboxDirections, OutdoorDurationProvider, OutdoorParams, RoutingProfile,
    StraightLineWalking,
};

// Core types
pub use crate::Error;
pub use crate::Floor;
pub use crate::Seconds;
