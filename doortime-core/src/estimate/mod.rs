//! Door-to-floor estimation: entrance choice, indoor model and the
//! orchestrating [`estimate_eta`].

mod entrance;
mod estimator;
pub mod params;
mod to_geojson;
pub mod vertical;

pub use entrance::select_entrance;
pub use estimator::{Breakdown, EstimateRequest, EstimateResult, estimate_eta};
pub use params::{IndoorParams, ResolvedIndoorParams, ResolvedVerticalMode, VerticalMode};
