use log::{debug, warn};

use crate::{
    Error,
    model::{Building, Coordinate, Entrance, haversine_distance},
};

/// Chooses the entrance to route to.
///
/// A preferred entrance id wins when the building has it; otherwise the
/// entrance closest to `origin` is used, the first one listed on ties.
///
/// # Errors
///
/// Returns [`Error::InvalidBuildingData`] if the building has no entrances.
pub fn select_entrance<'a>(
    origin: &Coordinate,
    building: &'a Building,
    preferred_id: Option<&str>,
) -> Result<&'a Entrance, Error> {
    if let Some(id) = preferred_id {
        if let Some(entrance) = building.entrance(id) {
            debug!("Using preferred entrance '{id}' of {}", building.id);
            return Ok(entrance);
        }
        warn!(
            "Preferred entrance '{id}' does not exist on building {}; using the nearest one",
            building.id
        );
    }

    let nearest = nearest_entrance(origin, &building.entrances).ok_or_else(|| {
        Error::InvalidBuildingData(format!("building {} has no entrances", building.id))
    })?;
    debug!("Nearest entrance of {} is '{}'", building.id, nearest.id);
    Ok(nearest)
}

fn nearest_entrance<'a>(origin: &Coordinate, entrances: &'a [Entrance]) -> Option<&'a Entrance> {
    let mut best: Option<(&Entrance, f64)> = None;
    for entrance in entrances {
        let distance = haversine_distance(origin, &entrance.location);
        // Strict comparison keeps the earlier entrance on ties
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((entrance, distance));
        }
    }
    best.map(|(entrance, _)| entrance)
}
