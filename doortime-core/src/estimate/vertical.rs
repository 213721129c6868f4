use super::params::{ResolvedIndoorParams, ResolvedVerticalMode, STAIR_CLIMB_SPEED_MPS};
use crate::{Floor, Seconds};

/// Floors gained between the entrance and the destination; never negative
pub fn floors_to_climb(entrance_floor: Floor, target_floor: Floor) -> u32 {
    u32::try_from(i64::from(target_floor) - i64::from(entrance_floor)).unwrap_or(0)
}

/// Time spent changing floors, with the mode that was used
pub fn vertical_seconds(
    floors: u32,
    floor_height_meters: f64,
    params: &ResolvedIndoorParams,
) -> (Seconds, ResolvedVerticalMode) {
    let mode = params.vertical_mode.resolve(floors);
    if floors == 0 {
        return (0.0, mode);
    }

    let floors = f64::from(floors);
    let seconds = match mode {
        ResolvedVerticalMode::Stairs => match params.stairs_seconds_per_floor {
            Some(per_floor) => floors * per_floor,
            None => floors * floor_height_meters / STAIR_CLIMB_SPEED_MPS,
        },
        ResolvedVerticalMode::Elevator => {
            params.elevator_wait_seconds
                + floors * params.elevator_sec_per_floor
                + params.elevator_door_seconds
        }
    };

    (seconds, mode)
}
