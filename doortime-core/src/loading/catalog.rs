use std::collections::HashSet;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::model::building::is_valid_dimension;
use crate::{Building, Error};

/// Validated set of buildings, looked up by id
#[derive(Debug, Clone, Default)]
pub struct BuildingCatalog {
    buildings: Vec<Building>,
}

/// `{"buildings": [...]}` layout; a bare array is accepted too
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedCatalog {
    buildings: Vec<Building>,
}

impl BuildingCatalog {
    /// Builds a catalog after validating every building.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuildingData`] for empty or duplicate ids,
    /// buildings without entrances, or non-positive dimensions.
    pub fn new(buildings: Vec<Building>) -> Result<Self, Error> {
        validate_buildings(&buildings)?;
        Ok(Self { buildings })
    }

    /// Parses a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the data is invalid
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        // Pick the layout up front so field errors are reported as they are
        let buildings = if json.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Building>>(json)?
        } else {
            serde_json::from_str::<WrappedCatalog>(json)?.buildings
        };
        Self::new(buildings)
    }

    /// Reads a JSON catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read catalog '{}': {}", path.display(), e),
            )
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} buildings with {} entrances from {}",
            catalog.len(),
            catalog.entrance_count(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|building| building.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn entrance_count(&self) -> usize {
        self.buildings.iter().map(|b| b.entrances.len()).sum()
    }
}

fn validate_buildings(buildings: &[Building]) -> Result<(), Error> {
    let mut building_ids = HashSet::with_capacity(buildings.len());

    for building in buildings {
        if building.id.trim().is_empty() {
            return Err(Error::InvalidBuildingData(format!(
                "building '{}' has an empty id",
                building.name
            )));
        }
        if !building_ids.insert(building.id.as_str()) {
            return Err(Error::InvalidBuildingData(format!(
                "duplicate building id {}",
                building.id
            )));
        }
        if building.entrances.is_empty() {
            return Err(Error::InvalidBuildingData(format!(
                "building {} has no entrances",
                building.id
            )));
        }

        let mut entrance_ids = HashSet::with_capacity(building.entrances.len());
        for entrance in &building.entrances {
            if !entrance_ids.insert(entrance.id.as_str()) {
                return Err(Error::InvalidBuildingData(format!(
                    "building {} lists entrance {} twice",
                    building.id, entrance.id
                )));
            }
        }

        let dimensions = [
            ("floor_height_meters", building.floor_height_meters),
            ("avg_indoor_to_core_meters", building.avg_indoor_to_core_meters),
            ("avg_core_to_dest_meters", building.avg_core_to_dest_meters),
        ];
        for (name, value) in dimensions {
            if let Some(value) = value {
                if !is_valid_dimension(value) {
                    return Err(Error::InvalidBuildingData(format!(
                        "building {} has non-positive {name}: {value}",
                        building.id
                    )));
                }
            }
        }
    }

    Ok(())
}
