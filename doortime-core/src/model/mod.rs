//! Data model for buildings and geographic positions

pub mod building;
pub mod coordinate;

pub use building::{
    Building, DEFAULT_CORE_TO_DEST_METERS, DEFAULT_FLOOR_HEIGHT_METERS,
    DEFAULT_INDOOR_TO_CORE_METERS, Entrance,
};
pub use coordinate::{Coordinate, haversine_distance};
