//! Door-to-floor walking time estimation.
//!
//! Combines an outdoor walking-route duration with a model of the indoor part
//! of the trip: entrance selection, horizontal walking, stairs or elevator,
//! and fixed behavioral penalties.

pub mod error;
pub mod estimate;
pub mod loading;
pub mod model;
pub mod outdoor;
pub mod prelude;

pub use error::Error;
pub use estimate::{
    Breakdown, EstimateRequest, EstimateResult, IndoorParams, ResolvedIndoorParams,
    ResolvedVerticalMode, VerticalMode, estimate_eta, select_entrance,
};
pub use loading::BuildingCatalog;
pub use model::{Building, Coordinate, Entrance, haversine_distance};
pub use outdoor::{
    MAX_OUTDOOR_SECONDS, MapboxConfig, MapboxDirections, OutdoorDurationProvider, OutdoorParams,
    ProviderError, RoutingProfile, StraightLineWalking,
};

/// Duration in seconds
pub type Seconds = f64;

/// Building floor level; may be negative for basements
pub type Floor = i32;

/// Mean Earth radius used for haversine distances, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
