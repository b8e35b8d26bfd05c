//! House layout generation split into placement, wall, door, corridor, and stair submodules.

pub mod corridor;
pub mod doors;
pub mod placement;
pub mod stairs;
pub mod walls;

mod generator;

pub use corridor::{CorridorPath, corridor_path};
pub use doors::{DoorCoordinate, resolve_door_coordinate};
pub use generator::HouseGenerator;
pub use placement::{PlacementOutcome, RoomPlacer};
pub use walls::{WallCut, WallSet, segment_wall};

use crate::config::{ConfigError, HouseConfig};
use crate::model::HouseModel;
use crate::rng::RandomSource;

pub fn generate_house(
    config: &HouseConfig,
    rng: &mut impl RandomSource,
) -> Result<HouseModel, ConfigError> {
    Ok(HouseGenerator::new(config)?.generate(rng))
}
