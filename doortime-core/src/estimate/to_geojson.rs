use geo::{LineString, Point};
use geojson::{Feature, Geometry};
use serde_json::json;

use super::EstimateResult;
use crate::Error;

impl EstimateResult {
    /// Straight segment from the origin to the chosen entrance
    pub fn outdoor_leg(&self) -> LineString<f64> {
        let from: Point<f64> = self.origin.into();
        let to: Point<f64> = self.entrance.location.into();
        LineString::from(vec![from, to])
    }

    /// Convert the estimate to a `GeoJSON` Feature over its outdoor leg
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let leg = self.outdoor_leg();

        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new((&leg).into()),
            "properties": {
                "leg_type": "outdoor",
                "building_id": self.building_id,
                "entrance_id": self.entrance.id,
                "entrance_name": self.entrance.name,
                "entrance_floor": self.entrance.entrance_floor,
                "vertical_mode": self.vertical_mode,
                "floors_to_climb": self.floors_to_climb,
                "total_seconds": self.total_seconds,
                "total_minutes": self.total_minutes,
                "breakdown": self.breakdown,
            }
        });

        Ok(Feature::from_json_value(value)?)
    }
}
