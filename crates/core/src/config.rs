//! Construction-time generation parameters and their fail-fast validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat record of every generation parameter. This is also the persisted snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    pub rooms_per_floor: usize,
    pub floors: usize,
    /// Inclusive `(width, height)` lower bound.
    pub room_size_min: (i32, i32),
    /// Inclusive `(width, height)` upper bound.
    pub room_size_max: (i32, i32),
    pub floor_height: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub corridor_width: f32,
    pub door_width: f32,
    pub door_height: f32,
    pub player_height: f32,
    /// Placement attempts per room before that room is abandoned.
    pub max_placement_attempts: u32,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            rooms_per_floor: 5,
            floors: 2,
            room_size_min: (4, 4),
            room_size_max: (8, 8),
            floor_height: 3.0,
            wall_height: 2.8,
            wall_thickness: 0.2,
            corridor_width: 2.0,
            door_width: 1.2,
            door_height: 2.2,
            player_height: 1.8,
            max_placement_attempts: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("room size bounds must be positive, got min {min:?}")]
    NonPositiveRoomSize { min: (i32, i32) },
    #[error("room size min {min:?} exceeds max {max:?}")]
    InvertedRoomSize { min: (i32, i32), max: (i32, i32) },
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidDimension { field: &'static str, value: f32 },
    #[error("door height {door_height} exceeds wall height {wall_height}")]
    DoorTallerThanWall { door_height: f32, wall_height: f32 },
    #[error("wall height {wall_height} exceeds floor height {floor_height}")]
    WallTallerThanFloor { wall_height: f32, floor_height: f32 },
    #[error("door width {door_width} does not fit the smallest room side {smallest_side}")]
    DoorWiderThanRoom { door_width: f32, smallest_side: i32 },
    #[error("wall thickness {wall_thickness} does not fit the smallest room side {smallest_side}")]
    WallThickerThanRoom { wall_thickness: f32, smallest_side: i32 },
}

impl HouseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms_per_floor == 0 {
            return Err(ConfigError::ZeroCount { field: "rooms_per_floor" });
        }
        if self.floors == 0 {
            return Err(ConfigError::ZeroCount { field: "floors" });
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroCount { field: "max_placement_attempts" });
        }

        let (min_w, min_h) = self.room_size_min;
        let (max_w, max_h) = self.room_size_max;
        if min_w <= 0 || min_h <= 0 {
            return Err(ConfigError::NonPositiveRoomSize { min: self.room_size_min });
        }
        if min_w > max_w || min_h > max_h {
            return Err(ConfigError::InvertedRoomSize {
                min: self.room_size_min,
                max: self.room_size_max,
            });
        }

        for (field, value) in [
            ("floor_height", self.floor_height),
            ("wall_height", self.wall_height),
            ("wall_thickness", self.wall_thickness),
            ("corridor_width", self.corridor_width),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("player_height", self.player_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        if self.door_height > self.wall_height {
            return Err(ConfigError::DoorTallerThanWall {
                door_height: self.door_height,
                wall_height: self.wall_height,
            });
        }
        if self.wall_height > self.floor_height {
            return Err(ConfigError::WallTallerThanFloor {
                wall_height: self.wall_height,
                floor_height: self.floor_height,
            });
        }

        let smallest_side = min_w.min(min_h);
        if self.door_width >= smallest_side as f32 {
            return Err(ConfigError::DoorWiderThanRoom {
                door_width: self.door_width,
                smallest_side,
            });
        }
        // A wall at least as thick as its room side flips orientation and cuts across its depth.
        if self.wall_thickness >= smallest_side as f32 {
            return Err(ConfigError::WallThickerThanRoom {
                wall_thickness: self.wall_thickness,
                smallest_side,
            });
        }

        Ok(())
    }

    pub fn elevation(&self, floor: usize) -> f32 {
        floor as f32 * self.floor_height
    }

    pub fn is_top_floor(&self, floor: usize) -> bool {
        floor + 1 >= self.floors
    }
}
