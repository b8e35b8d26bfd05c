pub mod config;
pub mod geometry;
pub mod house;
pub mod layout;
pub mod model;
pub mod rng;

pub use config::{ConfigError, HouseConfig};
pub use geometry::{Axis, Box3, Direction, GridPos, Point3, RoomRect};
pub use house::House;
pub use layout::{HouseGenerator, generate_house};
pub use model::*;
pub use rng::{HouseRng, RandomSource, ScriptedRandom};
